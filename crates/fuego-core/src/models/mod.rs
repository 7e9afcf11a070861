//! Data models for the back office entities.
//!
//! Each entity has two shapes:
//!
//! - the domain type (`Reservation`, `Announcement`, `MenuItem`) used by the
//!   dashboard and stored in the local cache with camelCase field names
//! - the raw database row (`*Row`) with snake_case columns and loosely typed
//!   values, plus a `normalize` step that fills defaults and drops rows
//!   without an identifier

pub mod announcement;
pub mod fields;
pub mod menu;
pub mod reservation;

pub use announcement::{Announcement, AnnouncementRow, NewAnnouncementRow};
pub use menu::{MenuItem, MenuItemRow, PriceUpdate};
pub use reservation::{
    is_local_id, party_size, NewReservation, NewReservationRow, Reservation, ReservationRow,
    ReservationStatus, LOCAL_ID_PREFIX,
};
