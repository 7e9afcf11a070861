//! Tab-specific content rendering.

pub mod menu;
pub mod overview;
pub mod reservations;
pub mod settings;
