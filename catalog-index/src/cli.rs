///
/// This module implements the CLI interface for catalog-index: command parsing,
/// argument validation and the async entrypoint.
///
/// All core business logic (loading, normalization, queries, ranking) lives in
/// the [`catalog-index-core`] crate. This module only drives a catalog view,
/// hands user input to the query engine and prints the result.
///
/// ## How To Use
/// - For command-line users: use the installed `catalog-index` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// [`catalog-index-core`]: ../../catalog-index-core/
use crate::load_config::{load_config, CliConfig};
use crate::render::{render_listing, render_previews};
use anyhow::{Context, Result};
use catalog_index_core::contract::IndexLoader;
use catalog_index_core::entry::KNOWN_YEARS;
use catalog_index_core::loader::DefaultIndexLoader;
use catalog_index_core::query::{CatalogQuery, ExtMatch, EXT_ALL};
use catalog_index_core::view::{load_previews, CatalogStatus, CatalogView};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI for catalog-index: browse and preview document catalogs.
#[derive(Parser)]
#[clap(
    name = "catalog-index",
    version,
    about = "Browse, filter and preview course and exercise file catalogs"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the files of one catalog, optionally filtered
    List {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Catalog label from the config (e.g. "Cours")
        #[clap(long)]
        catalog: String,
        /// Year tag: 3eme, 4eme or 5eme
        #[clap(long)]
        year: Option<String>,
        /// Extension tag, or "all"
        #[clap(long, default_value = EXT_ALL)]
        ext: String,
        /// Case-insensitive substring of the file name
        #[clap(long)]
        search: Option<String>,
        /// Let the extension filter match by prefix ("ppt" also matches "pptx")
        #[clap(long)]
        prefix_ext: bool,
        /// Print matching entries as JSON instead of text
        #[clap(long)]
        json: bool,
    },
    /// Show the most recently added files of every configured catalog
    Preview {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Entries per catalog (defaults to the config's preview_limit)
        #[clap(long)]
        limit: Option<usize>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::List {
            config,
            catalog,
            year,
            ext,
            search,
            prefix_ext,
            json,
        } => {
            let config = load_config(config)?;
            let loader = build_loader(&config)?;
            let query = CatalogQuery {
                year,
                ext: Some(ext),
                text: search,
                ext_match: if prefix_ext {
                    ExtMatch::Prefix
                } else {
                    ExtMatch::Exact
                },
            };
            tracing::info!(command = "list", catalog = %catalog, ?query, "Listing catalog");
            let output = list(&config, &loader, &catalog, &query, json).await?;
            print!("{output}");
            Ok(())
        }
        Commands::Preview { config, limit } => {
            let config = load_config(config)?;
            let loader = build_loader(&config)?;
            let limit = limit.unwrap_or(config.preview_limit);
            if limit == 0 {
                anyhow::bail!("--limit must be a positive integer");
            }
            tracing::info!(command = "preview", limit, "Loading previews");
            let previews = load_previews(&loader, &config.preview_targets(), limit).await;
            print!("{}", render_previews(&previews, config.locale));
            Ok(())
        }
    }
}

fn build_loader(config: &CliConfig) -> Result<DefaultIndexLoader> {
    DefaultIndexLoader::new(config.base_url.clone(), config.timeout())
        .context("Failed to construct HTTP client")
}

/// Load one catalog and render the entries matching `query`.
///
/// A failed load is an error of the command; an empty match is not.
pub async fn list<L: IndexLoader + ?Sized>(
    config: &CliConfig,
    loader: &L,
    catalog: &str,
    query: &CatalogQuery,
    json: bool,
) -> Result<String> {
    let section = config.catalog(catalog).with_context(|| {
        let known: Vec<&str> = config.catalogs.iter().map(|c| c.label.as_str()).collect();
        format!("Unknown catalog '{catalog}', expected one of {known:?}")
    })?;

    if let Some(year) = query.year.as_deref().filter(|y| !y.is_empty()) {
        if !KNOWN_YEARS.contains(&year.to_lowercase().as_str()) {
            tracing::warn!(year = %year, known = ?KNOWN_YEARS, "Year tag outside the known set");
        }
    }

    let mut view = CatalogView::new(section.source.clone());
    if let Some(message) = &section.error_message {
        view = view.with_error_message(message.clone());
    }

    if let CatalogStatus::Error(message) = view.refresh(loader).await {
        tracing::error!(command = "list", catalog = %section.label, "Catalog unavailable");
        anyhow::bail!("{message}");
    }

    let matches = view.query(query).unwrap_or_default();
    tracing::info!(command = "list", matches = matches.len(), "Query complete");

    if json {
        return serde_json::to_string_pretty(&matches)
            .map(|s| s + "\n")
            .context("Failed to serialize entries as JSON");
    }
    Ok(render_listing(&section.label, &matches, config.locale))
}
