//! # view: catalog state as seen by a presentation layer
//!
//! A [`CatalogView`] owns the state of one catalog on screen: the source it
//! shows, a tri-state [`CatalogStatus`] and the generation of the load it is
//! waiting for.
//!
//! ## Stale results
//! Every load attempt gets a [`LoadTicket`]. Tearing the view down or
//! pointing it at another source bumps the generation, so a result that
//! arrives for an older ticket is dropped instead of overwriting newer state.
//! The in-flight request itself is not aborted.
//!
//! ## Errors
//! Transport and format failures both end in [`CatalogStatus::Error`] with
//! the view's user-facing message. The error kind is only logged.
//!
//! ## Previews
//! [`load_previews`] loads several catalogs concurrently and ranks each one
//! independently for the landing page.

use futures::future::join_all;
use tracing::{debug, error, info};

use crate::contract::{CatalogSource, IndexLoader, LoadError, RawRecord};
use crate::entry::CatalogEntry;
use crate::normalize::normalize;
use crate::query::{query, CatalogQuery};
use crate::rank::rank;

pub const DEFAULT_ERROR_MESSAGE: &str = "Impossible de charger la liste.";

/// What a presentation layer should render for a catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogStatus {
    Loading,
    Error(String),
    /// Loaded; the list may be empty.
    Ready(Vec<CatalogEntry>),
}

impl CatalogStatus {
    pub fn entries(&self) -> Option<&[CatalogEntry]> {
        match self {
            CatalogStatus::Ready(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Identifies one load attempt of a [`CatalogView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

pub struct CatalogView {
    source: CatalogSource,
    error_message: String,
    status: CatalogStatus,
    generation: u64,
}

impl CatalogView {
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            status: CatalogStatus::Loading,
            generation: 0,
        }
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    /// Start a load attempt. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.status = CatalogStatus::Loading;
        debug!(source = %self.source, generation = self.generation, "Catalog load started");
        LoadTicket(self.generation)
    }

    /// Whether `ticket` still belongs to the current load attempt.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Apply a load result. Returns `false` when the ticket is stale and the
    /// result was dropped.
    pub fn complete(&mut self, ticket: LoadTicket, result: Result<Vec<RawRecord>, LoadError>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                source = %self.source,
                ticket = ticket.0,
                current = self.generation,
                "Dropping stale catalog load result"
            );
            return false;
        }
        self.status = match result {
            Ok(raw) => {
                let entries = normalize(&raw);
                info!(source = %self.source, entries = entries.len(), "Catalog ready");
                CatalogStatus::Ready(entries)
            }
            Err(e) => {
                error!(source = %self.source, kind = e.kind(), error = %e, "Catalog unavailable");
                CatalogStatus::Error(self.error_message.clone())
            }
        };
        true
    }

    /// Point the view at another source; pending loads become stale.
    pub fn set_source(&mut self, source: CatalogSource) {
        if source != self.source {
            self.source = source;
            self.teardown();
        }
    }

    /// Invalidate any pending load, e.g. when the view leaves the screen.
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.status = CatalogStatus::Loading;
    }

    /// Run a full load cycle against `loader`.
    pub async fn refresh<L: IndexLoader + ?Sized>(&mut self, loader: &L) -> &CatalogStatus {
        let ticket = self.begin_load();
        let result = loader.load(&self.source).await;
        self.complete(ticket, result);
        &self.status
    }

    /// Filter the loaded entries. `None` while loading or after an error.
    pub fn query(&self, q: &CatalogQuery) -> Option<Vec<&CatalogEntry>> {
        self.status.entries().map(|entries| query(entries, q))
    }
}

/// One catalog shown on the landing page.
#[derive(Debug, Clone)]
pub struct PreviewTarget {
    pub label: String,
    pub source: CatalogSource,
    pub error_message: Option<String>,
}

/// Ranked preview of one catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPreview {
    pub label: String,
    /// `Ready` holds at most `limit` entries, newest first.
    pub status: CatalogStatus,
}

/// Load every target concurrently and rank each catalog on its own.
///
/// Results come back in the order of `targets`. A failing catalog does not
/// affect the others.
pub async fn load_previews<L: IndexLoader + ?Sized>(
    loader: &L,
    targets: &[PreviewTarget],
    limit: usize,
) -> Vec<CatalogPreview> {
    info!(catalogs = targets.len(), limit, "Loading catalog previews");
    let loads = targets.iter().map(|t| loader.load(&t.source));
    let results = join_all(loads).await;

    targets
        .iter()
        .zip(results)
        .map(|(target, result)| {
            let status = match result {
                Ok(raw) => {
                    let entries = normalize(&raw);
                    CatalogStatus::Ready(rank(&entries, limit).into_iter().cloned().collect())
                }
                Err(e) => {
                    error!(label = %target.label, kind = e.kind(), error = %e, "Preview unavailable");
                    CatalogStatus::Error(
                        target
                            .error_message
                            .clone()
                            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
                    )
                }
            };
            CatalogPreview {
                label: target.label.clone(),
                status,
            }
        })
        .collect()
}
