// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The Lingo translation service.
//!
//! [`TranslationService`] owns the active-locale state machine and ties the
//! locale registry, catalog store, and load coordinator together behind the
//! binding-layer surface: a never-fail [`translate`](TranslationService::translate),
//! locale switching with rollback on failure, change listeners with tagged
//! subscription handles, preloading, and webhook-driven invalidation.
//!
//! The service is an explicit object constructed once at application start
//! and passed by reference to consumers; there are no module-level
//! singletons.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lingo_catalog::HttpCatalogFetcher;
//! use lingo_translate::{FilePreferenceStore, TranslationService};
//!
//! let service = TranslationService::builder()
//!     .fetcher(Arc::new(HttpCatalogFetcher::from_env()?))
//!     .preferences(Arc::new(FilePreferenceStore::new("/var/lib/lingo/locale")))
//!     .build()?;
//!
//! service.init(&["fr-CA".to_string()]).await?;
//! let title = service.translate("menu.title", &[]).await;
//! ```

mod error;
mod listeners;
mod preferences;
mod service;

pub use error::{Result, TranslateError};
pub use listeners::{ListenerSet, Subscription};
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use service::{TranslationService, TranslationServiceBuilder, GLOBAL_CATALOG};
