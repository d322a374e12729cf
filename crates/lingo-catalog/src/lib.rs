// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation catalogs and load coordination for Lingo.
//!
//! A [`Catalog`] is the loaded translation data for one locale: an
//! arbitrarily nested mapping with string leaves, addressable by
//! dot-delimited paths (`menu.title`). Catalogs are created by a successful
//! load, replaced wholesale on invalidation, and never partially mutated.
//!
//! The [`CatalogStore`] caches catalogs by exact locale string and never
//! performs I/O; population is the [`LoadCoordinator`]'s job. The
//! coordinator guarantees single-flight loading (at most one
//! [`CatalogFetcher`] invocation outstanding per locale, no matter how
//! many callers ask concurrently) and applies the base-locale fallback
//! policy when a fetch fails.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lingo_catalog::{CatalogStore, HttpCatalogFetcher, LoadCoordinator};
//!
//! let store = Arc::new(CatalogStore::new());
//! let fetcher = Arc::new(HttpCatalogFetcher::new("https://cdn.example.com/translations"));
//! let coordinator = LoadCoordinator::new(store, fetcher, "en");
//!
//! let catalog = coordinator.load("fr-FR").await?;
//! assert_eq!(catalog.lookup("menu.title"), Some("Menu"));
//! ```

mod coordinator;
mod error;
mod fetch;
mod singleflight;
mod store;
mod tree;

pub use coordinator::{LoadCoordinator, LoadResult};
pub use error::{CatalogError, Result};
pub use fetch::{CatalogFetcher, HttpCatalogFetcher, TRANSLATIONS_URL_ENV};
pub use singleflight::SingleFlight;
pub use store::CatalogStore;
pub use tree::{interpolate, Catalog, CatalogValue};
