use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{id_string, lenient_bool, lenient_text, timestamp_ms};

/// A site-wide notice ("closed on the holiday, back on the 2nd").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Epoch milliseconds
    #[serde(default)]
    pub created_at: i64,
}

fn default_active() -> bool {
    true
}

/// An `announcements` row exactly as the database returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementRow {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub is_active: Option<Value>,
}

impl AnnouncementRow {
    pub fn normalize(self, now_ms: i64) -> Option<Announcement> {
        let id = id_string(self.id.as_ref())?;
        Some(Announcement {
            id,
            message: lenient_text(self.message.as_ref()).unwrap_or_default(),
            is_active: lenient_bool(self.is_active.as_ref()).unwrap_or(true),
            created_at: timestamp_ms(self.created_at.as_ref()).unwrap_or(now_ms),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAnnouncementRow<'a> {
    pub message: &'a str,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_announcement() {
        let row: AnnouncementRow = serde_json::from_value(json!({
            "id": "c0ffee00-0000-4000-8000-000000000002",
            "created_at": "2024-02-01 12:00:00+00",
            "message": "Fechados no feriado",
            "is_active": "f"
        }))
        .expect("valid row");
        let a = row.normalize(0).expect("row has id");
        assert_eq!(a.message, "Fechados no feriado");
        assert!(!a.is_active);
        assert_eq!(a.created_at, 1_706_788_800_000);
    }

    #[test]
    fn test_normalize_defaults() {
        let row: AnnouncementRow = serde_json::from_value(json!({ "id": 7 })).expect("valid row");
        let a = row.normalize(77).expect("row has id");
        assert_eq!(a.id, "7");
        assert_eq!(a.message, "");
        assert!(a.is_active);
        assert_eq!(a.created_at, 77);

        let orphan: AnnouncementRow = serde_json::from_value(json!({ "message": "x" })).expect("valid row");
        assert!(orphan.normalize(0).is_none());
    }

    #[test]
    fn test_cache_roundtrip_field_names() {
        let parsed: Announcement = serde_json::from_value(json!({
            "id": "local_1706788800000",
            "message": "Novo horário",
            "isActive": false,
            "createdAt": 1706788800000i64
        }))
        .expect("cache entry parses");
        assert!(!parsed.is_active);
        assert_eq!(parsed.created_at, 1_706_788_800_000);
    }
}
