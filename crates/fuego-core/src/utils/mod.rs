//! Utility functions for formatting, identifiers and time.

pub mod format;

pub use format::{format_date, format_price, now_millis, parse_price, truncate_string};

use rand::Rng;

use crate::models::LOCAL_ID_PREFIX;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random suffix length for locally minted reservation ids.
const LOCAL_ID_SUFFIX_LEN: usize = 9;

/// Identifier for a reservation created without the database: `local_` + 9 base-36 chars.
pub fn local_reservation_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..LOCAL_ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}{}", LOCAL_ID_PREFIX, suffix)
}

/// Identifier for an announcement created without the database: `local_<epoch ms>`.
pub fn local_announcement_id(now_ms: i64) -> String {
    format!("{}{}", LOCAL_ID_PREFIX, now_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_reservation_id_shape() {
        let id = local_reservation_id();
        assert!(id.starts_with("local_"));
        assert_eq!(id.len(), 15);
        assert!(id[6..].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(id, local_reservation_id());
    }

    #[test]
    fn test_local_announcement_id() {
        assert_eq!(local_announcement_id(1706788800000), "local_1706788800000");
    }
}
