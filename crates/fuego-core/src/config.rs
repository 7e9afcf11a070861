//! Application configuration management.
//!
//! Configuration is stored at `~/.config/fuego-admin/config.json` and can be
//! overridden from the environment (a `.env` file is honored by the binary):
//!
//! - `FUEGO_SUPABASE_URL` / `FUEGO_SUPABASE_ANON_KEY`: hosted database project
//! - `FUEGO_CACHE_DIR`: where the local fallback store lives
//! - `FUEGO_OFFLINE`: `1`/`true` forces local-only operation
//!
//! Without both a URL and a key the back office runs entirely from the local cache.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "fuego-admin";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    /// Overrides the platform cache directory
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Location label shown in the title bar
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default)]
    pub offline_mode: bool,
}

impl Config {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Overlay values found through `lookup` (normally the process environment).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("FUEGO_SUPABASE_URL") {
            self.supabase_url = Some(url);
        }
        if let Some(key) = lookup("FUEGO_SUPABASE_ANON_KEY") {
            self.supabase_anon_key = Some(key);
        }
        if let Some(dir) = lookup("FUEGO_CACHE_DIR").filter(|d| !d.trim().is_empty()) {
            self.cache_dir = Some(PathBuf::from(dir));
        }
        if let Some(flag) = lookup("FUEGO_OFFLINE") {
            self.offline_mode = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    /// Database URL and anon key, only when both are non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let url = self.supabase_url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        let key = self.supabase_anon_key.as_deref().map(str::trim).filter(|k| !k.is_empty())?;
        Some((url, key))
    }

    /// True when the remote store should be used at all.
    pub fn remote_enabled(&self) -> bool {
        !self.offline_mode && self.credentials().is_some()
    }

    pub fn unit_label(&self) -> &str {
        self.unit_name.as_deref().unwrap_or("Unidade Jardins")
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_credentials_require_url_and_key() {
        let mut config = Config::default();
        assert!(config.credentials().is_none());

        config.supabase_url = Some("https://example.supabase.co".to_string());
        assert!(config.credentials().is_none());

        config.supabase_anon_key = Some("   ".to_string());
        assert!(config.credentials().is_none());

        config.supabase_anon_key = Some("anon".to_string());
        assert_eq!(config.credentials(), Some(("https://example.supabase.co", "anon")));
        assert!(config.remote_enabled());
    }

    #[test]
    fn test_offline_mode_disables_remote() {
        let config = Config {
            supabase_url: Some("https://example.supabase.co".to_string()),
            supabase_anon_key: Some("anon".to_string()),
            offline_mode: true,
            ..Default::default()
        };
        assert!(config.credentials().is_some());
        assert!(!config.remote_enabled());
    }

    #[test]
    fn test_apply_env_overrides() {
        let vars = env(&[
            ("FUEGO_SUPABASE_URL", "https://env.supabase.co"),
            ("FUEGO_SUPABASE_ANON_KEY", "env-key"),
            ("FUEGO_CACHE_DIR", "/tmp/fuego"),
            ("FUEGO_OFFLINE", "TRUE"),
        ]);
        let mut config = Config::default();
        config.apply_env(|k| vars.get(k).cloned());

        assert_eq!(config.supabase_url.as_deref(), Some("https://env.supabase.co"));
        assert_eq!(config.supabase_anon_key.as_deref(), Some("env-key"));
        assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/fuego")));
        assert!(config.offline_mode);
        assert_eq!(config.cache_dir().ok(), Some(PathBuf::from("/tmp/fuego")));
    }

    #[test]
    fn test_apply_env_leaves_unset_values() {
        let mut config = Config {
            unit_name: Some("Unidade Centro".to_string()),
            ..Default::default()
        };
        config.apply_env(|_| None);
        assert!(config.supabase_url.is_none());
        assert!(!config.offline_mode);
        assert_eq!(config.unit_label(), "Unidade Centro");
    }
}
