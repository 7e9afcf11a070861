//! Local fallback store.
//!
//! This module provides `LocalCache`, a small key-value store where every key is
//! a JSON file holding an array. It keeps shadow copies of what the database
//! returned and is the only store when no database is configured.
//!
//! Keys:
//! - `fuego_reservations`
//! - `fuego_announcements`
//! - `fuego_menu_v5`

pub mod manager;

pub use manager::{age_display, CacheAges, LocalCache};
