use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::Snapshot;

/// Merge prior history with freshly scraped snapshots.
///
/// The sequences are concatenated history-first and collapsed on the
/// `(model, price, calendar day)` identity key, keeping the first
/// occurrence. A same-day rescrape therefore never displaces the row
/// already persisted, even when non-key fields such as `sku` differ.
/// Pure function, no I/O.
pub fn merge(existing: Vec<Snapshot>, incoming: Vec<Snapshot>) -> Vec<Snapshot> {
    let mut seen: HashSet<(String, u64, NaiveDate)> = HashSet::new();
    let mut merged = Vec::with_capacity(existing.len() + incoming.len());

    for snapshot in existing.into_iter().chain(incoming) {
        if seen.insert(snapshot.identity_key()) {
            merged.push(snapshot);
        }
    }

    merged
}
