//! REST client module for the hosted database.
//!
//! This module provides the `RemoteStore` trait, the seam the service layer talks
//! to, and `SupabaseClient`, its implementation over the database's PostgREST
//! surface (`{project}/rest/v1/<table>`).
//!
//! Requests carry the project's anon key both as `apikey` and as a bearer token;
//! row-level-security policies on the tables decide what that key may do.

pub mod client;
pub mod error;
pub mod remote;

pub use client::{SupabaseClient, ANNOUNCEMENTS_TABLE, MENU_ITEMS_TABLE, RESERVATIONS_TABLE};
pub use error::ApiError;
pub use remote::RemoteStore;
