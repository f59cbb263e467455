/// `load_config` module: Loads the YAML file describing which catalogs the CLI shows and how.
///
/// This is the only place where user-supplied YAML is parsed. The core crate
/// reads no configuration at all; everything it needs is passed in here.
///
/// # Responsibilities
/// - Parse the configuration file into [`CliConfig`]
/// - Apply defaults (locale, preview limit, request timeout)
/// - Reject configurations the CLI cannot act on, with clear diagnostics
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::Result;
use catalog_index_core::contract::CatalogSource;
use catalog_index_core::format::DateLocale;
use catalog_index_core::loader::DEFAULT_TIMEOUT;
use catalog_index_core::rank::DEFAULT_PREVIEW_LIMIT;
use catalog_index_core::view::PreviewTarget;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct CliConfig {
    /// Base URL that `named` catalog sources are resolved against.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub locale: DateLocale,
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub catalogs: Vec<CatalogSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSection {
    pub label: String,
    pub source: CatalogSource,
    #[serde(default)]
    pub error_message: Option<String>,
}

fn default_preview_limit() -> usize {
    DEFAULT_PREVIEW_LIMIT
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl CliConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Catalog by label, compared case-insensitively.
    pub fn catalog(&self, label: &str) -> Option<&CatalogSection> {
        self.catalogs
            .iter()
            .find(|c| c.label.eq_ignore_ascii_case(label))
    }

    pub fn preview_targets(&self) -> Vec<PreviewTarget> {
        self.catalogs
            .iter()
            .map(|c| PreviewTarget {
                label: c.label.clone(),
                source: c.source.clone(),
                error_message: c.error_message.clone(),
            })
            .collect()
    }
}

/// Loads and validates the YAML config file at `path`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let config: CliConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    if config.catalogs.is_empty() {
        error!(config_path = ?path_ref, "No catalogs declared in config");
        anyhow::bail!("Config must declare at least one catalog");
    }
    if config.preview_limit == 0 {
        error!(config_path = ?path_ref, "preview_limit must be positive");
        anyhow::bail!("preview_limit must be a positive integer");
    }
    let needs_base = config
        .catalogs
        .iter()
        .any(|c| matches!(c.source, CatalogSource::Named { .. }));
    if needs_base && config.base_url.is_none() {
        error!(config_path = ?path_ref, "Named catalog sources require base_url");
        anyhow::bail!("Named catalog sources require a base_url");
    }

    info!(
        catalogs = config.catalogs.len(),
        preview_limit = config.preview_limit,
        locale = ?config.locale,
        "Config loaded successfully"
    );
    Ok(config)
}
