//! The canonical catalog entry.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::contract::RawRecord;

/// Year tags used by the portal to group documents.
pub const KNOWN_YEARS: [&str; 3] = ["3eme", "4eme", "5eme"];

/// Name shown when neither an explicit name nor a URL segment is usable.
pub const FALLBACK_NAME: &str = "Fichier";

/// A normalized document record.
///
/// Built only by [`crate::normalize`], so `name` and `url` are never empty,
/// `ext` and `year` are lower-case, and `size` is finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    name: String,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uploaded_at: Option<String>,
    year: String,
    ext: String,
}

impl CatalogEntry {
    pub(crate) fn new(
        name: String,
        url: String,
        size: Option<f64>,
        uploaded_at: Option<String>,
        year: String,
        ext: String,
    ) -> Self {
        debug_assert!(!name.is_empty() && !url.is_empty());
        Self {
            name,
            url,
            size,
            uploaded_at,
            year,
            ext,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn size(&self) -> Option<f64> {
        self.size
    }

    pub fn uploaded_at(&self) -> Option<&str> {
        self.uploaded_at.as_deref()
    }

    /// Empty when the source did not specify a year.
    pub fn year(&self) -> &str {
        &self.year
    }

    /// Empty when no extension could be resolved.
    pub fn ext(&self) -> &str {
        &self.ext
    }

    /// Upload time, if present and parseable.
    pub fn uploaded_at_parsed(&self) -> Option<DateTime<Utc>> {
        self.uploaded_at.as_deref().and_then(parse_timestamp)
    }

    /// Re-express the entry in the catalog source format.
    pub fn to_raw(&self) -> RawRecord {
        RawRecord::new(serde_json::to_value(self).unwrap_or_default())
    }
}

/// Parse an upload timestamp.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]` (taken as UTC) and a
/// bare `YYYY-MM-DD` date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
