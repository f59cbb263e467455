//! # contract: shared types and the loader interface
//!
//! This module defines the raw listing record, the catalog source identifier,
//! the load error kinds and the [`IndexLoader`] trait that every loader
//! (HTTP, local file, test mock) implements.
//!
//! ## Interface & Extensibility
//! - Implement [`IndexLoader`] to add a new way of fetching a listing.
//! - Loaders return raw records only; normalization happens downstream in
//!   [`crate::normalize`], never inside a loader.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate
//!   deterministic mocks (`MockIndexLoader`) for unit/integration tests.

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

/// One element of a catalog listing, exactly as decoded from the source.
///
/// Fields are loosely typed: any key may be missing or carry the wrong JSON
/// type. Accessors return `None` instead of failing so the normalizer can
/// substitute defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Value);

impl RawRecord {
    pub fn new(value: Value) -> Self {
        RawRecord(value)
    }

    /// The record's fields, if it is a JSON object at all.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }

    /// A string field, or `None` when missing or not a string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields()?.get(key)?.as_str()
    }

    /// A string field that is also non-empty.
    pub fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.str_field(key).filter(|s| !s.is_empty())
    }

    /// A numeric field as `f64`, or `None` when missing or not a number.
    pub fn number_field(&self, key: &str) -> Option<f64> {
        self.fields()?.get(key)?.as_f64()
    }
}

/// Identifies where a catalog listing lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CatalogSource {
    /// Absolute URL of a JSON listing.
    Http { url: String },
    /// Listing stored on the local filesystem.
    File { path: PathBuf },
    /// Logical catalog name (e.g. `cours`, `td`), resolved by the loader
    /// against its base URL as `<base>/<name>/index.json`.
    Named { name: String },
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Http { url } => write!(f, "{url}"),
            CatalogSource::File { path } => write!(f, "{}", path.display()),
            CatalogSource::Named { name } => write!(f, "{name}"),
        }
    }
}

/// Why a listing could not be loaded.
///
/// The two kinds matter for diagnostics only. At the presentation boundary
/// both collapse into one "listing unavailable" message.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source could not be reached or answered with a non-success status.
    #[error("transport error for {source_id}: {reason}")]
    Transport {
        source_id: String,
        reason: String,
        status: Option<u16>,
    },
    /// The source answered, but the body is not a JSON array.
    #[error("format error for {source_id}: {reason}")]
    Format { source_id: String, reason: String },
}

impl LoadError {
    pub fn transport(source: &CatalogSource, reason: impl Into<String>) -> Self {
        LoadError::Transport {
            source_id: source.to_string(),
            reason: reason.into(),
            status: None,
        }
    }

    pub fn format(source: &CatalogSource, reason: impl Into<String>) -> Self {
        LoadError::Format {
            source_id: source.to_string(),
            reason: reason.into(),
        }
    }

    /// Short tag for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Transport { .. } => "transport",
            LoadError::Format { .. } => "format",
        }
    }
}

/// Trait for fetching the raw listing of a catalog.
///
/// Loading is the only suspension point of the pipeline. Implementors must
/// always fetch the current state of the source (no intermediate caching).
///
/// The trait is `Send` + `Sync` and intended for async/await usage.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait IndexLoader: Send + Sync {
    /// Fetch and decode the listing behind `source`.
    async fn load(&self, source: &CatalogSource) -> Result<Vec<RawRecord>, LoadError>;
}
