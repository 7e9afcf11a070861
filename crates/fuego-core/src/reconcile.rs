//! Identifier-based merge of remote and local record sets.
//!
//! The database is authoritative: when both sides hold a record with the same
//! identifier the remote copy wins. Local-only records (created while offline, or
//! shadow copies of rows the database no longer returns) are kept. The result is
//! ordered newest first.

use std::collections::HashSet;

use crate::models::{Announcement, Reservation};

/// Records that can be reconciled.
pub trait Keyed {
    fn key(&self) -> &str;
    /// Epoch milliseconds
    fn created_at(&self) -> i64;
}

impl Keyed for Reservation {
    fn key(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }
}

impl Keyed for Announcement {
    fn key(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }
}

/// Merge `remote` and `local`, first occurrence of each identifier winning,
/// then sort by `created_at` descending. The sort is stable, so ties keep
/// remote-before-local order.
pub fn merge_by_id<T: Keyed>(remote: Vec<T>, local: Vec<T>) -> Vec<T> {
    let mut seen: HashSet<String> = HashSet::with_capacity(remote.len() + local.len());
    let mut merged: Vec<T> = remote
        .into_iter()
        .chain(local)
        .filter(|record| seen.insert(record.key().to_string()))
        .collect();
    merged.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    merged
}
