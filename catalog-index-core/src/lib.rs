#![doc = "catalog-index-core: core logic library for catalog-index."]

//! This crate contains the document index pipeline: loading raw listings,
//! normalizing them into canonical entries, and answering filter, preview
//! and formatting queries against them.
//!
//! # Usage
//! Presentation layers (the `catalog-index` CLI, tests) depend on this crate
//! and drive a [`view::CatalogView`] or call the pure functions directly:
//! [`normalize::normalize`], [`query::query`], [`rank::rank`].

pub mod contract;
pub mod entry;
pub mod format;
pub mod loader;
pub mod normalize;
pub mod query;
pub mod rank;
pub mod view;

pub use contract::{CatalogSource, IndexLoader, LoadError, RawRecord};
pub use entry::{CatalogEntry, KNOWN_YEARS};
pub use query::{CatalogQuery, ExtMatch};
