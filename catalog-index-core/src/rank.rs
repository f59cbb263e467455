//! Preview ranking: the most recently added entries of a catalog.

use crate::entry::CatalogEntry;

/// Number of entries shown per catalog on the landing page.
pub const DEFAULT_PREVIEW_LIMIT: usize = 3;

/// The `limit` most recent entries, newest first.
///
/// Entries without a parseable upload time rank as the epoch, so they end up
/// last. The sort is stable: ties keep their input order.
pub fn rank(entries: &[CatalogEntry], limit: usize) -> Vec<&CatalogEntry> {
    let mut keyed: Vec<(i64, &CatalogEntry)> = entries
        .iter()
        .map(|e| {
            let millis = e.uploaded_at_parsed().map(|t| t.timestamp_millis()).unwrap_or(0);
            (millis, e)
        })
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.into_iter().take(limit).map(|(_, e)| e).collect()
}
