//! Back-office operations with remote/local fallback.
//!
//! `BackOffice` is the only thing the UI talks to. Every read tries the hosted
//! database first and falls back to the local cache; every write lands in the
//! local cache and is attempted remotely when a database is configured. Remote
//! failures are logged and never reach the caller.

use std::sync::Arc;

use anyhow::Result;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{RemoteStore, SupabaseClient};
use crate::cache::LocalCache;
use crate::config::Config;
use crate::defaults::default_menu;
use crate::models::{is_local_id, Announcement, MenuItem, NewReservation, Reservation, ReservationStatus};
use crate::reconcile::merge_by_id;
use crate::utils::{local_announcement_id, local_reservation_id, now_millis};

/// Input rejected before anything is written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid price: {0} (must be a finite number of at least 0)")]
    InvalidPrice(f64),

    #[error("Reservations can only be confirmed or cancelled, not set to {0}")]
    InvalidStatus(ReservationStatus),

    #[error("Announcement message is empty")]
    EmptyMessage,
}

pub struct BackOffice {
    remote: Option<Arc<dyn RemoteStore>>,
    cache: LocalCache,
}

impl BackOffice {
    pub fn new(remote: Option<Arc<dyn RemoteStore>>, cache: LocalCache) -> Self {
        Self { remote, cache }
    }

    /// Build from configuration: a database client when credentials are present
    /// and offline mode is off, plus the local cache directory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = LocalCache::new(config.cache_dir()?)?;
        let remote: Option<Arc<dyn RemoteStore>> = match config.credentials() {
            Some((url, key)) if config.remote_enabled() => {
                info!(url, "Using hosted database");
                Some(Arc::new(SupabaseClient::new(url, key)?))
            }
            _ => {
                info!("No database configured, running from local cache");
                None
            }
        };
        Ok(Self::new(remote, cache))
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn cache(&self) -> &LocalCache {
        &self.cache
    }

    /// Whether the database answers. Always false without one.
    pub async fn check_connection(&self) -> bool {
        let Some(remote) = &self.remote else {
            return false;
        };
        match remote.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Connection check failed");
                false
            }
        }
    }

    // ===== Reservations =====

    pub async fn fetch_reservations(&self) -> Vec<Reservation> {
        let local = self.cache.load_reservations();
        let Some(remote) = &self.remote else {
            return local;
        };

        let remote_rows = match remote.select_reservations().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "Reservations unavailable remotely, using local cache");
                return merge_by_id(Vec::new(), local);
            }
        };

        let now = now_millis();
        let fetched: Vec<Reservation> = remote_rows.into_iter().filter_map(|row| row.normalize(now)).collect();
        debug!(remote = fetched.len(), local = local.len(), "Merging reservations");

        let merged = merge_by_id(fetched, local);
        if let Err(e) = self.cache.save_reservations(&merged) {
            warn!(error = %e, "Failed to write reservations shadow copy");
        }
        merged
    }

    pub async fn create_reservation(&self, new: NewReservation) -> Result<Reservation> {
        let now = now_millis();
        let insert = new.to_insert_row();
        let local = new.into_reservation(local_reservation_id(), now);

        let created = match &self.remote {
            Some(remote) => match remote.insert_reservation(&insert).await {
                Ok(row) => row.normalize(now).unwrap_or_else(|| {
                    warn!("Inserted reservation came back without an id, keeping local copy");
                    local
                }),
                Err(e) => {
                    warn!(error = %e, "Reservation insert failed, saved locally only");
                    local
                }
            },
            None => local,
        };

        let mut cached = self.cache.load_reservations();
        cached.retain(|r| r.id != created.id);
        cached.insert(0, created.clone());
        self.cache.save_reservations(&cached)?;

        info!(id = %created.id, "Reservation created");
        Ok(created)
    }

    /// Move a reservation to `confirmed` or `cancelled`.
    ///
    /// Returns whether a locally stored reservation changed; unknown identifiers
    /// leave the cache untouched.
    pub async fn update_reservation_status(&self, id: &str, status: ReservationStatus) -> Result<bool> {
        if !status.is_decision() {
            return Err(ValidationError::InvalidStatus(status).into());
        }

        if let Some(remote) = self.remote_for(id) {
            if let Err(e) = remote.update_reservation_status(id, status).await {
                warn!(id, error = %e, "Status update failed remotely, applying locally");
            }
        }

        let mut cached = self.cache.load_reservations();
        let Some(reservation) = cached.iter_mut().find(|r| r.id == id) else {
            debug!(id, "Status update for unknown reservation ignored locally");
            return Ok(false);
        };
        reservation.status = status;
        self.cache.save_reservations(&cached)?;
        Ok(true)
    }

    // ===== Announcements =====

    pub async fn fetch_announcements(&self) -> Vec<Announcement> {
        let local = self.cache.load_announcements();
        let Some(remote) = &self.remote else {
            return local;
        };

        let remote_rows = match remote.select_announcements().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "Announcements unavailable remotely, using local cache");
                return merge_by_id(Vec::new(), local);
            }
        };

        let now = now_millis();
        let fetched: Vec<Announcement> = remote_rows.into_iter().filter_map(|row| row.normalize(now)).collect();
        let merged = merge_by_id(fetched, local);
        if let Err(e) = self.cache.save_announcements(&merged) {
            warn!(error = %e, "Failed to write announcements shadow copy");
        }
        merged
    }

    pub async fn create_announcement(&self, message: &str) -> Result<Announcement> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage.into());
        }

        let now = now_millis();
        let local = Announcement {
            id: local_announcement_id(now),
            message: message.to_string(),
            is_active: true,
            created_at: now,
        };

        let created = match &self.remote {
            Some(remote) => match remote.insert_announcement(message).await {
                Ok(row) => row.normalize(now).unwrap_or(local),
                Err(e) => {
                    warn!(error = %e, "Announcement insert failed, saved locally only");
                    local
                }
            },
            None => local,
        };

        let mut cached = self.cache.load_announcements();
        cached.retain(|a| a.id != created.id);
        cached.insert(0, created.clone());
        self.cache.save_announcements(&cached)?;
        Ok(created)
    }

    /// Set an announcement's visibility. Returns whether a local copy changed.
    pub async fn toggle_announcement(&self, id: &str, is_active: bool) -> Result<bool> {
        if let Some(remote) = self.remote_for(id) {
            if let Err(e) = remote.update_announcement_active(id, is_active).await {
                warn!(id, error = %e, "Announcement toggle failed remotely, applying locally");
            }
        }

        let mut cached = self.cache.load_announcements();
        let Some(announcement) = cached.iter_mut().find(|a| a.id == id) else {
            return Ok(false);
        };
        announcement.is_active = is_active;
        self.cache.save_announcements(&cached)?;
        Ok(true)
    }

    // ===== Menu =====

    /// The current menu. Never empty: an empty database table or a missing
    /// local copy yields the built-in defaults.
    pub async fn fetch_menu(&self) -> Vec<MenuItem> {
        let Some(remote) = &self.remote else {
            return self.cache.load_menu();
        };

        match remote.select_menu_items().await {
            Ok(rows) => {
                let items: Vec<MenuItem> = rows.into_iter().filter_map(|row| row.normalize()).collect();
                if items.is_empty() {
                    info!("Menu table is empty, showing defaults");
                    return default_menu();
                }
                if let Err(e) = self.cache.save_menu(&items) {
                    warn!(error = %e, "Failed to write menu shadow copy");
                }
                items
            }
            Err(e) => {
                warn!(error = %e, "Menu unavailable remotely, using local copy");
                self.cache.load_menu()
            }
        }
    }

    /// Change one item's price. The local menu is saved before the database is
    /// tried, so the change survives a failed remote write.
    pub async fn update_menu_item_price(&self, id: &str, price: f64) -> Result<Vec<MenuItem>> {
        if !price.is_finite() || price < 0.0 {
            return Err(ValidationError::InvalidPrice(price).into());
        }

        let mut menu = self.cache.load_menu();
        for item in menu.iter_mut().filter(|item| item.id == id) {
            item.price = price;
        }
        self.cache.save_menu(&menu)?;

        if let Some(remote) = &self.remote {
            if let Err(e) = remote.update_menu_item_price(id, price).await {
                warn!(id, error = %e, "Price update failed remotely, kept locally");
            }
        }
        Ok(menu)
    }

    /// Replace the menu with the built-in defaults, remotely (best effort) and locally.
    pub async fn reset_menu_to_defaults(&self) -> Result<Vec<MenuItem>> {
        let defaults = default_menu();
        if let Some(remote) = &self.remote {
            if let Err(e) = remote.replace_menu_items(&defaults).await {
                warn!(error = %e, "Remote menu reset failed");
            }
        }
        self.cache.save_menu(&defaults)?;
        info!(items = defaults.len(), "Menu reset to defaults");
        Ok(defaults)
    }

    /// The remote store, unless `id` was minted locally and so cannot exist there.
    fn remote_for(&self, id: &str) -> Option<&Arc<dyn RemoteStore>> {
        self.remote.as_ref().filter(|_| !is_local_id(id))
    }
}
