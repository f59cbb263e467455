//! Index loading: fetches raw catalog listings over HTTP or from local files.
//!
//! [`DefaultIndexLoader`] implements [`IndexLoader`] for every
//! [`CatalogSource`] variant. All variants share [`parse_listing`], which
//! enforces that the top-level JSON value is an array.

use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::contract::{CatalogSource, IndexLoader, LoadError, RawRecord};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Loader for HTTP, named and file sources.
///
/// Named sources are resolved against `base_url` as `<base>/<name>/index.json`.
pub struct DefaultIndexLoader {
    client: Client,
    base_url: Option<String>,
}

impl DefaultIndexLoader {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.map(|b| b.trim_end_matches('/').to_string()), // avoid "//"
        })
    }

    /// The URL a named catalog resolves to, if a base URL is configured.
    pub fn resolve_named(&self, name: &str) -> Option<String> {
        self.base_url
            .as_ref()
            .map(|base| format!("{}/{}/index.json", base, name.trim_matches('/')))
    }

    async fn fetch_http(&self, source: &CatalogSource, url: &str) -> Result<Vec<RawRecord>, LoadError> {
        info!(url = %url, "Fetching catalog index");

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, url = %url, "Failed to reach catalog source");
                LoadError::transport(source, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, url = %url, "Catalog source returned error status");
            return Err(LoadError::Transport {
                source_id: source.to_string(),
                reason: format!("HTTP {}", status.as_u16()),
                status: Some(status.as_u16()),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            error!(error = ?e, url = %url, "Failed to read catalog response body");
            LoadError::transport(source, e.to_string())
        })?;
        debug!(url = %url, bytes = body.len(), "Received catalog index body");

        parse_listing(source, &body)
    }

    async fn read_file(&self, source: &CatalogSource, path: &std::path::Path) -> Result<Vec<RawRecord>, LoadError> {
        info!(path = %path.display(), "Reading catalog index from file");
        let body = tokio::fs::read(path).await.map_err(|e| {
            error!(error = ?e, path = %path.display(), "Failed to read catalog index file");
            LoadError::transport(source, e.to_string())
        })?;
        parse_listing(source, &body)
    }
}

#[async_trait::async_trait]
impl IndexLoader for DefaultIndexLoader {
    async fn load(&self, source: &CatalogSource) -> Result<Vec<RawRecord>, LoadError> {
        let result = match source {
            CatalogSource::Http { url } => self.fetch_http(source, url).await,
            CatalogSource::Named { name } => match self.resolve_named(name) {
                Some(url) => self.fetch_http(source, &url).await,
                None => {
                    error!(catalog = %name, "Named catalog requested without a base URL");
                    Err(LoadError::transport(source, "no base URL configured for named catalog"))
                }
            },
            CatalogSource::File { path } => self.read_file(source, path).await,
        };

        match &result {
            Ok(records) => info!(source = %source, records = records.len(), "Catalog index loaded"),
            Err(e) => error!(source = %source, kind = e.kind(), error = %e, "Catalog index load failed"),
        }
        result
    }
}

/// Decode a listing body. Anything but a top-level JSON array is a format error.
pub fn parse_listing(source: &CatalogSource, body: &[u8]) -> Result<Vec<RawRecord>, LoadError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        error!(error = ?e, source = %source, "Catalog index is not valid JSON");
        LoadError::format(source, format!("invalid JSON: {e}"))
    })?;

    match value {
        Value::Array(items) => Ok(items.into_iter().map(RawRecord::new).collect()),
        other => {
            let found = json_kind(&other);
            error!(source = %source, found, "Catalog index JSON must be an array");
            Err(LoadError::format(
                source,
                format!("index JSON must be an array, found {found}"),
            ))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
