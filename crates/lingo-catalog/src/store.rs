// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-locale catalog cache.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::tree::Catalog;

/// Cache of loaded catalogs, keyed by exact locale string.
///
/// `get` is a pure cache read and never triggers a load; population is the
/// load coordinator's responsibility. No normalization is applied to keys,
/// so callers must use one consistent spelling per locale.
#[derive(Debug, Default)]
pub struct CatalogStore {
	entries: RwLock<HashMap<String, Arc<Catalog>>>,
}

impl CatalogStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// The cached catalog for `locale`, if present.
	pub async fn get(&self, locale: &str) -> Option<Arc<Catalog>> {
		self.entries.read().await.get(locale).cloned()
	}

	/// Whether a catalog is cached for `locale`.
	pub async fn contains(&self, locale: &str) -> bool {
		self.entries.read().await.contains_key(locale)
	}

	/// Caches `catalog` under `locale`, replacing any previous entry
	/// wholesale.
	pub async fn insert(&self, locale: &str, catalog: Arc<Catalog>) {
		self.entries
			.write()
			.await
			.insert(locale.to_string(), catalog);
	}

	/// Drops the entry for `locale`. Returns whether one existed.
	pub async fn evict(&self, locale: &str) -> bool {
		let evicted = self.entries.write().await.remove(locale).is_some();
		if evicted {
			debug!(locale, "Catalog evicted");
		}
		evicted
	}

	/// Drops every entry unconditionally.
	pub async fn evict_all(&self) {
		let mut entries = self.entries.write().await;
		let count = entries.len();
		entries.clear();
		debug!(count, "All catalogs evicted");
	}

	pub async fn len(&self) -> usize {
		self.entries.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.entries.read().await.is_empty()
	}
}
