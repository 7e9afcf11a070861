use anyhow::Result;
use async_trait::async_trait;

use crate::models::{
    AnnouncementRow, MenuItem, MenuItemRow, NewReservationRow, ReservationRow, ReservationStatus,
};

/// CRUD operations the back office needs from the hosted database.
///
/// Implementations return raw rows; normalization happens in the service layer
/// so every store gets the same defaults.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Cheap round trip proving the tables are reachable with the configured key.
    async fn ping(&self) -> Result<()>;

    /// All reservations, newest first.
    async fn select_reservations(&self) -> Result<Vec<ReservationRow>>;
    async fn insert_reservation(&self, row: &NewReservationRow) -> Result<ReservationRow>;
    async fn update_reservation_status(&self, id: &str, status: ReservationStatus) -> Result<()>;

    /// All announcements, newest first.
    async fn select_announcements(&self) -> Result<Vec<AnnouncementRow>>;
    async fn insert_announcement(&self, message: &str) -> Result<AnnouncementRow>;
    async fn update_announcement_active(&self, id: &str, is_active: bool) -> Result<()>;

    async fn select_menu_items(&self) -> Result<Vec<MenuItemRow>>;
    async fn update_menu_item_price(&self, id: &str, price: f64) -> Result<()>;
    /// Delete every menu row, then insert `items`. Nothing is inserted if the delete fails.
    async fn replace_menu_items(&self, items: &[MenuItem]) -> Result<()>;
}
