//! Lenient coercions for loosely typed database columns.
//!
//! Remote rows arrive as JSON whose types depend on how the table was created
//! (`numeric` comes back as a number or a string, booleans are sometimes `"t"`).
//! These helpers turn such values into the types the domain expects and return
//! `None` when nothing sensible can be extracted, so callers can pick a default.

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

/// Timestamp layouts with an explicit offset, tried after RFC 3339.
/// PostgreSQL's text output uses a space separator and a short `+00` offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%#z",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%#z",
];

/// Timestamp layouts without an offset; interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Identifier column: text as-is, numbers rendered as text, anything else rejected.
pub fn id_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Text column: strings as-is, numbers and booleans rendered as text.
pub fn lenient_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Boolean column: `true`, `"true"`, `"t"`, `1` are true; their opposites false.
pub fn lenient_bool(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|i| i == 1),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Some(true),
            "false" | "f" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Numeric column: numbers or numeric text; NaN and infinities rejected.
pub fn lenient_f64(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Timestamp column to epoch milliseconds.
///
/// Accepts integer epoch ms, RFC 3339, PostgreSQL text output and naive
/// timestamps (taken as UTC). The same instant always yields the same value.
pub fn timestamp_ms(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => parse_timestamp(s),
        _ => None,
    }
}

pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().all(|c| c.is_ascii_digit()) {
        return s.parse().ok();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.timestamp_millis());
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// 2024-02-01 12:00:00 UTC
    const NOON_FEB_1: i64 = 1_706_788_800_000;

    #[test]
    fn test_timestamp_formats_agree() {
        let inputs = [
            json!("2024-02-01T12:00:00Z"),
            json!("2024-02-01T12:00:00+00:00"),
            json!("2024-02-01T09:00:00-03:00"),
            json!("2024-02-01 12:00:00+00"),
            json!("2024-02-01 12:00:00.000+00"),
            json!("2024-02-01T12:00:00.000000+00:00"),
            json!("2024-02-01T12:00:00"),
            json!("2024-02-01 12:00:00"),
            json!(NOON_FEB_1),
            json!("1706788800000"),
        ];
        for input in &inputs {
            assert_eq!(timestamp_ms(Some(input)), Some(NOON_FEB_1), "input: {}", input);
        }
    }

    #[test]
    fn test_timestamp_keeps_milliseconds() {
        let value = json!("2024-02-01T12:00:00.250+00:00");
        assert_eq!(timestamp_ms(Some(&value)), Some(NOON_FEB_1 + 250));
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        assert_eq!(timestamp_ms(None), None);
        assert_eq!(timestamp_ms(Some(&json!(null))), None);
        assert_eq!(timestamp_ms(Some(&json!(""))), None);
        assert_eq!(timestamp_ms(Some(&json!("yesterday"))), None);
        assert_eq!(timestamp_ms(Some(&json!(true))), None);
    }

    #[test]
    fn test_lenient_bool() {
        assert_eq!(lenient_bool(Some(&json!(true))), Some(true));
        assert_eq!(lenient_bool(Some(&json!("true"))), Some(true));
        assert_eq!(lenient_bool(Some(&json!("t"))), Some(true));
        assert_eq!(lenient_bool(Some(&json!(1))), Some(true));
        assert_eq!(lenient_bool(Some(&json!("f"))), Some(false));
        assert_eq!(lenient_bool(Some(&json!(0))), Some(false));
        assert_eq!(lenient_bool(Some(&json!("maybe"))), None);
        assert_eq!(lenient_bool(None), None);
    }

    #[test]
    fn test_lenient_f64() {
        assert_eq!(lenient_f64(Some(&json!(89.9))), Some(89.9));
        assert_eq!(lenient_f64(Some(&json!("75.00"))), Some(75.0));
        assert_eq!(lenient_f64(Some(&json!("32,50"))), Some(32.5));
        assert_eq!(lenient_f64(Some(&json!("abc"))), None);
        assert_eq!(lenient_f64(Some(&json!(null))), None);
    }

    #[test]
    fn test_id_string() {
        assert_eq!(id_string(Some(&json!("abc-123"))), Some("abc-123".to_string()));
        assert_eq!(id_string(Some(&json!(17))), Some("17".to_string()));
        assert_eq!(id_string(Some(&json!(""))), None);
        assert_eq!(id_string(Some(&json!(null))), None);
        assert_eq!(id_string(None), None);
    }

    #[test]
    fn test_lenient_text() {
        assert_eq!(lenient_text(Some(&json!("Ana"))), Some("Ana".to_string()));
        assert_eq!(lenient_text(Some(&json!(11999990000_i64))), Some("11999990000".to_string()));
        assert_eq!(lenient_text(Some(&json!(false))), Some("false".to_string()));
        assert_eq!(lenient_text(Some(&json!(["x"]))), None);
        assert_eq!(lenient_text(Some(&json!(null))), None);
    }
}
