use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::fields::{id_string, lenient_text, timestamp_ms};

/// Prefix marking identifiers minted on this machine rather than by the database.
pub const LOCAL_ID_PREFIX: &str = "local_";

const DEFAULT_PAX: &str = "2 Pessoas";
const DEFAULT_TABLE_TYPE: &str = "Salão Principal";
const DEFAULT_PARTY_SIZE: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(ReservationStatus::Pending),
            "confirmed" => Some(ReservationStatus::Confirmed),
            "cancelled" | "canceled" => Some(ReservationStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether a manager decision may move a reservation into this status.
    pub fn is_decision(&self) -> bool {
        matches!(self, ReservationStatus::Confirmed | ReservationStatus::Cancelled)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservationStatus::Pending => write!(f, "Pending"),
            ReservationStatus::Confirmed => write!(f, "Confirmed"),
            ReservationStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

// Unknown values from old cache files degrade to Pending instead of failing the whole list.
impl<'de> Deserialize<'de> for ReservationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(Self::parse).unwrap_or_default())
    }
}

/// A table reservation as the dashboard sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_pax")]
    pub pax: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default = "default_table_type")]
    pub table_type: String,
    #[serde(default)]
    pub status: ReservationStatus,
    /// Epoch milliseconds
    #[serde(default)]
    pub created_at: i64,
}

fn default_pax() -> String {
    DEFAULT_PAX.to_string()
}

fn default_table_type() -> String {
    DEFAULT_TABLE_TYPE.to_string()
}

impl Reservation {
    pub fn is_local(&self) -> bool {
        is_local_id(&self.id)
    }
}

pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}

/// The part of a reservation supplied by the person booking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub client_name: String,
    pub phone: String,
    pub pax: String,
    pub date: String,
    pub time: String,
    pub table_type: String,
}

impl NewReservation {
    pub fn into_reservation(self, id: String, created_at: i64) -> Reservation {
        Reservation {
            id,
            client_name: self.client_name,
            phone: self.phone,
            pax: if self.pax.trim().is_empty() { default_pax() } else { self.pax },
            date: self.date,
            time: self.time,
            table_type: if self.table_type.trim().is_empty() {
                default_table_type()
            } else {
                self.table_type
            },
            status: ReservationStatus::Confirmed,
            created_at,
        }
    }

    /// Insert payload for the `reservations` table.
    pub fn to_insert_row(&self) -> NewReservationRow {
        NewReservationRow {
            client_name: self.client_name.clone(),
            phone: self.phone.clone(),
            pax: party_size(&self.pax),
            date: self.date.clone(),
            time: self.time.clone(),
            table_type: self.table_type.clone(),
            status: ReservationStatus::Confirmed,
        }
    }
}

/// Number of guests encoded in a display string such as `"4 Pessoas"`.
pub fn party_size(pax: &str) -> i64 {
    let digits: String = pax.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.parse::<i64>() {
        Ok(n) if n > 0 => n,
        _ => DEFAULT_PARTY_SIZE,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReservationRow {
    pub client_name: String,
    pub phone: String,
    pub pax: i64,
    pub date: String,
    pub time: String,
    pub table_type: String,
    pub status: ReservationStatus,
}

/// A `reservations` row exactly as the database returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationRow {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub client_name: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub pax: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub time: Option<Value>,
    #[serde(default)]
    pub table_type: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
}

impl ReservationRow {
    /// Normalize into a `Reservation`; rows without an identifier are dropped.
    pub fn normalize(self, now_ms: i64) -> Option<Reservation> {
        let id = id_string(self.id.as_ref())?;
        Some(Reservation {
            id,
            client_name: lenient_text(self.client_name.as_ref()).unwrap_or_default(),
            phone: lenient_text(self.phone.as_ref()).unwrap_or_default(),
            pax: pax_display(self.pax.as_ref()),
            date: lenient_text(self.date.as_ref()).unwrap_or_default(),
            time: lenient_text(self.time.as_ref()).unwrap_or_default(),
            table_type: lenient_text(self.table_type.as_ref())
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(default_table_type),
            status: lenient_text(self.status.as_ref())
                .as_deref()
                .and_then(ReservationStatus::parse)
                .unwrap_or_default(),
            created_at: timestamp_ms(self.created_at.as_ref()).unwrap_or(now_ms),
        })
    }
}

fn pax_display(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => format!("{} Pessoas", i),
            None => format!("{} Pessoas", n),
        },
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => default_pax(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> ReservationRow {
        serde_json::from_value(value).expect("valid reservation row")
    }

    #[test]
    fn test_normalize_full_row() {
        let r = row(json!({
            "id": "9b2f6c1e-0000-4000-8000-000000000001",
            "created_at": "2024-02-01T12:00:00+00:00",
            "client_name": "Ana Souza",
            "phone": "11999990000",
            "pax": 4,
            "date": "2024-02-03",
            "time": "20:00",
            "table_type": "Varanda",
            "status": "pending"
        }))
        .normalize(0)
        .expect("row has id");

        assert_eq!(r.client_name, "Ana Souza");
        assert_eq!(r.pax, "4 Pessoas");
        assert_eq!(r.table_type, "Varanda");
        assert_eq!(r.status, ReservationStatus::Pending);
        assert_eq!(r.created_at, 1_706_788_800_000);
    }

    #[test]
    fn test_normalize_defaults_missing_fields() {
        let r = row(json!({ "id": 42, "status": "weird" })).normalize(123).expect("row has id");
        assert_eq!(r.id, "42");
        assert_eq!(r.phone, "");
        assert_eq!(r.pax, "2 Pessoas");
        assert_eq!(r.table_type, "Salão Principal");
        assert_eq!(r.status, ReservationStatus::Pending);
        assert_eq!(r.created_at, 123);
    }

    #[test]
    fn test_normalize_coerces_mistyped_text_columns() {
        let r = row(json!({
            "id": "b",
            "client_name": "Caio",
            "phone": 11999990000_i64,
            "date": "2024-02-03",
            "time": null,
            "table_type": ["Varanda"],
            "status": "confirmed"
        }))
        .normalize(0)
        .expect("row has id");

        assert_eq!(r.client_name, "Caio");
        assert_eq!(r.phone, "11999990000");
        assert_eq!(r.time, "");
        assert_eq!(r.table_type, "Salão Principal");
        assert_eq!(r.status, ReservationStatus::Confirmed);
    }

    #[test]
    fn test_normalize_drops_rows_without_id() {
        assert!(row(json!({ "client_name": "Sem id" })).normalize(0).is_none());
        assert!(row(json!({ "id": null })).normalize(0).is_none());
    }

    #[test]
    fn test_pax_text_is_kept() {
        let r = row(json!({ "id": "a", "pax": "6+ Pessoas" })).normalize(0).expect("row has id");
        assert_eq!(r.pax, "6+ Pessoas");
    }

    #[test]
    fn test_party_size() {
        assert_eq!(party_size("4 Pessoas"), 4);
        assert_eq!(party_size("10"), 10);
        assert_eq!(party_size("Pessoas"), 2);
        assert_eq!(party_size(""), 2);
        assert_eq!(party_size("0 Pessoas"), 2);
    }

    #[test]
    fn test_status_parse_and_decision() {
        assert_eq!(ReservationStatus::parse("Confirmed"), Some(ReservationStatus::Confirmed));
        assert_eq!(ReservationStatus::parse("canceled"), Some(ReservationStatus::Cancelled));
        assert_eq!(ReservationStatus::parse("nope"), None);
        assert!(ReservationStatus::Confirmed.is_decision());
        assert!(ReservationStatus::Cancelled.is_decision());
        assert!(!ReservationStatus::Pending.is_decision());
    }

    #[test]
    fn test_cache_format_is_camel_case() {
        let r = Reservation {
            id: "local_abc".to_string(),
            client_name: "Bruno".to_string(),
            phone: String::new(),
            pax: "3 Pessoas".to_string(),
            date: "2024-02-03".to_string(),
            time: "19:30".to_string(),
            table_type: "Salão Principal".to_string(),
            status: ReservationStatus::Cancelled,
            created_at: 5,
        };
        let value = serde_json::to_value(&r).expect("serializes");
        assert_eq!(value["clientName"], "Bruno");
        assert_eq!(value["tableType"], "Salão Principal");
        assert_eq!(value["status"], "cancelled");
        assert_eq!(value["createdAt"], 5);
        assert!(r.is_local());
    }

    #[test]
    fn test_unknown_cached_status_becomes_pending() {
        let r: Reservation =
            serde_json::from_value(json!({ "id": "x", "status": "archived" })).expect("parses");
        assert_eq!(r.status, ReservationStatus::Pending);
    }

    #[test]
    fn test_new_reservation_insert_row() {
        let new = NewReservation {
            client_name: "Carla".to_string(),
            pax: "5 Pessoas".to_string(),
            ..Default::default()
        };
        let insert = new.to_insert_row();
        assert_eq!(insert.pax, 5);
        assert_eq!(insert.status, ReservationStatus::Confirmed);

        let local = new.into_reservation("local_1".to_string(), 9);
        assert_eq!(local.status, ReservationStatus::Confirmed);
        assert_eq!(local.table_type, "Salão Principal");
        assert_eq!(local.created_at, 9);
    }
}
