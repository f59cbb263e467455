//! Record normalization: raw listing records → canonical [`CatalogEntry`] values.
//!
//! Normalization is total. A field that is missing or of the wrong type falls
//! back to its default, so one bad record never invalidates a listing. The
//! only records dropped are those without a usable `url`, since an entry
//! without a locator cannot be displayed or downloaded.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::contract::RawRecord;
use crate::entry::{CatalogEntry, FALLBACK_NAME};

/// Normalize a whole listing, preserving input order.
pub fn normalize(raw: &[RawRecord]) -> Vec<CatalogEntry> {
    let entries: Vec<CatalogEntry> = raw
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let entry = normalize_record(record);
            if entry.is_none() {
                warn!(index, "Skipping catalog record without a usable url");
            }
            entry
        })
        .collect();
    debug!(input = raw.len(), output = entries.len(), "Normalized catalog records");
    entries
}

/// Normalize a single record. `None` when the record has no non-empty `url`.
pub fn normalize_record(record: &RawRecord) -> Option<CatalogEntry> {
    let url = record.non_empty_str("url")?;

    let ext = record
        .non_empty_str("ext")
        .map(str::to_string)
        .or_else(|| extension_from_url(url))
        .unwrap_or_default()
        .to_lowercase();

    let name = record
        .non_empty_str("name")
        .or_else(|| url.rsplit('/').next().filter(|segment| !segment.is_empty()))
        .unwrap_or(FALLBACK_NAME)
        .to_string();

    let size = record
        .number_field("size")
        .filter(|s| s.is_finite() && *s >= 0.0);

    let uploaded_at = record
        .non_empty_str("uploadedAt")
        .or_else(|| record.non_empty_str("uploaded"))
        .map(str::to_string);

    let year = record.str_field("year").unwrap_or_default().to_lowercase();

    Some(CatalogEntry::new(
        name,
        url.to_string(),
        size,
        uploaded_at,
        year,
        ext,
    ))
}

/// Extension of the last path segment of `url`, lower-cased.
///
/// The extension must be ASCII alphanumeric and immediately followed by `?`,
/// `#` or the end of the string.
pub fn extension_from_url(url: &str) -> Option<String> {
    static EXT_RE: OnceLock<Regex> = OnceLock::new();
    let re = EXT_RE.get_or_init(|| {
        Regex::new(r"\.([a-zA-Z0-9]+)(?:\?|#|$)").expect("extension pattern is valid")
    });
    re.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}
