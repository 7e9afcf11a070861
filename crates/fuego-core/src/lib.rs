//! Core library for the Fuego back office.
//!
//! Everything the dashboard needs that is not presentation lives here:
//!
//! - `api`: REST client for the hosted database (`RemoteStore` trait + `SupabaseClient`)
//! - `cache`: per-entity JSON files acting as the local fallback store
//! - `models`: reservations, announcements, menu items and their row normalization
//! - `reconcile`: identifier-based merge of remote and local record sets
//! - `service`: `BackOffice`, the remote-first / local-fallback operations
//! - `dashboard`: derived statistics, status filters and price drafts
//! - `schema`: SQL generator for the database tables and seed data

pub mod api;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod defaults;
pub mod models;
pub mod reconcile;
pub mod schema;
pub mod service;
pub mod utils;

pub use api::{ApiError, RemoteStore, SupabaseClient};
pub use cache::LocalCache;
pub use config::Config;
pub use service::{BackOffice, ValidationError};
