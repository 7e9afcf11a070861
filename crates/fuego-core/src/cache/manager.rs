use std::path::PathBuf;
use std::time::SystemTime;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::defaults::default_menu;
use crate::models::fields::id_string;
use crate::models::{Announcement, MenuItem, Reservation};

pub const RESERVATIONS_KEY: &str = "fuego_reservations";
pub const ANNOUNCEMENTS_KEY: &str = "fuego_announcements";
/// Versioned so a format change can abandon old menu copies.
pub const MENU_KEY: &str = "fuego_menu_v5";

pub struct LocalCache {
    cache_dir: PathBuf,
}

impl LocalCache {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.cache_dir
    }

    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    fn corrupt_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.corrupt.json", key))
    }

    /// Load a list entry by entry; unusable entries are skipped.
    ///
    /// Whenever something is skipped the original file is copied to
    /// `<key>.corrupt.json` first, so the next save cannot destroy it.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>> {
        let path = self.cache_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", key))?;

        let entries: Vec<Value> = match serde_json::from_str(&contents) {
            Ok(entries) => entries,
            Err(e) => {
                self.set_aside(key, &contents);
                return Err(e).with_context(|| format!("Failed to parse cache file: {}", key));
            }
        };

        let total = entries.len();
        let items: Vec<T> = entries
            .into_iter()
            .filter_map(|entry| decode_entry(key, entry))
            .collect();

        if items.len() < total {
            warn!(cache = key, skipped = total - items.len(), "Skipping unusable cache entries");
            self.set_aside(key, &contents);
        }

        Ok(Some(items))
    }

    fn set_aside(&self, key: &str, contents: &str) {
        let path = self.corrupt_path(key);
        match std::fs::write(&path, contents) {
            Ok(()) => warn!(cache = key, path = %path.display(), "Kept a copy of the damaged cache file"),
            Err(e) => warn!(cache = key, error = %e, "Could not keep a copy of the damaged cache file"),
        }
    }

    fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let path = self.cache_path(key);
        let contents = serde_json::to_string_pretty(items)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write cache file: {}", key))?;
        Ok(())
    }

    /// Load a list, treating a missing or unparseable file as empty.
    fn load_or_empty<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.load(key) {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(cache = key, error = %e, "Discarding unreadable cache file");
                Vec::new()
            }
        }
    }

    // ===== Reservations =====

    pub fn load_reservations(&self) -> Vec<Reservation> {
        self.load_or_empty(RESERVATIONS_KEY)
    }

    pub fn save_reservations(&self, reservations: &[Reservation]) -> Result<()> {
        self.save(RESERVATIONS_KEY, reservations)
    }

    // ===== Announcements =====

    pub fn load_announcements(&self) -> Vec<Announcement> {
        self.load_or_empty(ANNOUNCEMENTS_KEY)
    }

    pub fn save_announcements(&self, announcements: &[Announcement]) -> Result<()> {
        self.save(ANNOUNCEMENTS_KEY, announcements)
    }

    // ===== Menu =====

    /// The stored menu, or the built-in defaults when there is no usable copy.
    pub fn load_menu(&self) -> Vec<MenuItem> {
        match self.load::<MenuItem>(MENU_KEY) {
            Ok(Some(items)) if !items.is_empty() => items,
            Ok(_) => default_menu(),
            Err(e) => {
                warn!(error = %e, "Local menu unreadable, using defaults");
                default_menu()
            }
        }
    }

    pub fn save_menu(&self, items: &[MenuItem]) -> Result<()> {
        self.save(MENU_KEY, items)
    }

    // ===== Cache Age Information =====

    fn modified_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let path = self.cache_path(key);
        match std::fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(time) => Some(DateTime::<Utc>::from(time)),
            Err(e) => {
                debug!(cache = key, error = %e, "No modification time for cache file");
                None
            }
        }
    }

    fn age_of(&self, key: &str) -> Option<String> {
        self.modified_at(key).map(|at| {
            let minutes = (DateTime::<Utc>::from(SystemTime::now()) - at).num_minutes();
            age_display(minutes)
        })
    }

    pub fn get_cache_ages(&self) -> CacheAges {
        CacheAges {
            reservations: self.age_of(RESERVATIONS_KEY),
            announcements: self.age_of(ANNOUNCEMENTS_KEY),
            menu: self.age_of(MENU_KEY),
        }
    }
}

/// Human readable age for a number of minutes ("just now", "5m ago", "2h ago", "3d ago").
pub fn age_display(minutes: i64) -> String {
    if minutes < 1 {
        // Also covers clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        if minutes % 60 >= 30 {
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    } else {
        let days = minutes / 1440;
        if (minutes % 1440) / 60 >= 12 {
            format!("{}d ago", days + 1)
        } else {
            format!("{}d ago", days)
        }
    }
}

#[derive(Debug, Default)]
pub struct CacheAges {
    pub reservations: Option<String>,
    pub announcements: Option<String>,
    pub menu: Option<String>,
}

impl CacheAges {
    /// Age of the reservation copy, falling back to the menu copy
    pub fn last_updated(&self) -> String {
        self.reservations
            .clone()
            .or_else(|| self.menu.clone())
            .unwrap_or_else(|| "never".to_string())
    }
}

/// Decode one stored entry, accepting numeric ids.
fn decode_entry<T: DeserializeOwned>(key: &str, mut entry: Value) -> Option<T> {
    if let Value::Object(map) = &mut entry {
        if let Some(id) = id_string(map.get("id")) {
            map.insert("id".to_string(), Value::String(id));
        }
    }
    match serde_json::from_value(entry) {
        Ok(item) => Some(item),
        Err(e) => {
            warn!(cache = key, error = %e, "Skipping unusable cache entry");
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
