/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Price with two decimals and the currency symbol: `R$ 89.90`
pub fn format_price(price: f64) -> String {
    if price.is_finite() {
        format!("R$ {:.2}", price)
    } else {
        "R$ 0.00".to_string()
    }
}

/// Parse a typed price. Accepts `,` as the decimal separator; only finite,
/// non-negative values are prices.
pub fn parse_price(input: &str) -> Option<f64> {
    let normalized = input.trim().trim_start_matches("R$").trim().replace(',', ".");
    let price = normalized.parse::<f64>().ok()?;
    (price.is_finite() && price >= 0.0).then_some(price)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an epoch-ms timestamp as a local calendar date
pub fn format_date(epoch_ms: i64) -> String {
    match chrono::DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.with_timezone(&chrono::Local).format("%d/%m/%Y").to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(189.9), "R$ 189.90");
        assert_eq!(format_price(0.0), "R$ 0.00");
        assert_eq!(format_price(f64::NAN), "R$ 0.00");
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("89.90"), Some(89.9));
        assert_eq!(parse_price(" 32,5 "), Some(32.5));
        assert_eq!(parse_price("R$ 10"), Some(10.0));
        assert_eq!(parse_price("0"), Some(0.0));
        assert_eq!(parse_price("-1"), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("inf"), None);
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Burrata", 10), "Burrata");
        assert_eq!(truncate_string("Carbonara Autêntica", 12), "Carbonara...");
        assert_eq!(truncate_string("Ok", 2), "Ok");
    }
}
