// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Single-flight catalog loading with base-locale fallback.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, warn};

use crate::error::CatalogError;
use crate::fetch::CatalogFetcher;
use crate::singleflight::SingleFlight;
use crate::store::CatalogStore;
use crate::tree::Catalog;

/// The shared outcome of one catalog load, fanned out to every waiter.
pub type LoadResult = std::result::Result<Arc<Catalog>, Arc<CatalogError>>;

/// Coordinates catalog loads against the store.
///
/// Guarantees, under arbitrary concurrent call volume:
///
/// - a store hit returns immediately, without suspension;
/// - at most one fetch is outstanding per locale; concurrent callers
///   attach to the in-flight operation and observe its settled outcome;
/// - a failed fetch leaves no entry behind, so a later call retries;
/// - a fetch failure for a non-base locale degrades to the base-locale
///   catalog (one level, never further); a base-locale failure is the one
///   unrecoverable path and propagates to every waiter.
///
/// Loads superseded by an invalidation still settle for their waiters, but
/// their results are discarded rather than cached.
#[derive(Clone)]
pub struct LoadCoordinator {
	store: Arc<CatalogStore>,
	fetcher: Arc<dyn CatalogFetcher>,
	flights: Arc<SingleFlight<LoadResult>>,
	// Bumped by invalidation; an operation begun under an older epoch skips
	// settlement so its result is discarded instead of cached.
	global_epoch: Arc<AtomicU64>,
	locale_epochs: Arc<std::sync::Mutex<HashMap<String, u64>>>,
	base_locale: String,
}

/// Invalidation epoch snapshot captured when an operation is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Epoch {
	global: u64,
	locale: u64,
}

impl LoadCoordinator {
	pub fn new(
		store: Arc<CatalogStore>,
		fetcher: Arc<dyn CatalogFetcher>,
		base_locale: impl Into<String>,
	) -> Self {
		Self {
			store,
			fetcher,
			flights: Arc::new(SingleFlight::new()),
			global_epoch: Arc::new(AtomicU64::new(0)),
			locale_epochs: Arc::new(std::sync::Mutex::new(HashMap::new())),
			base_locale: base_locale.into(),
		}
	}

	/// The designated terminal fallback locale.
	pub fn base_locale(&self) -> &str {
		&self.base_locale
	}

	/// The catalog store this coordinator populates.
	pub fn store(&self) -> &Arc<CatalogStore> {
		&self.store
	}

	/// Loads the catalog for `locale`, suspending until it is available or
	/// the load fails.
	#[tracing::instrument(level = "debug", skip(self))]
	pub async fn load(&self, locale: &str) -> LoadResult {
		self.load_inner(locale, true).await
	}

	/// Whether a load for `locale` is currently in flight.
	pub async fn is_loading(&self, locale: &str) -> bool {
		self.flights.contains(locale).await
	}

	/// Evicts `locale` from the store and forgets its in-flight operation.
	///
	/// Eviction completes before this returns, so a reload started
	/// afterwards can never be satisfied by the stale entry; an in-flight
	/// load that settles later is discarded instead of cached.
	pub async fn invalidate(&self, locale: &str) {
		self.bump_locale_epoch(locale);
		self.store.evict(locale).await;
		self.flights.forget(locale).await;
		debug!(locale, "Catalog invalidated");
	}

	/// Evicts every catalog and forgets every in-flight operation.
	pub async fn invalidate_all(&self) {
		self.global_epoch.fetch_add(1, Ordering::SeqCst);
		self.store.evict_all().await;
		self.flights.forget_all().await;
		debug!("All catalogs invalidated");
	}

	async fn load_inner(&self, locale: &str, allow_fallback: bool) -> LoadResult {
		if let Some(catalog) = self.store.get(locale).await {
			return Ok(catalog);
		}

		let this = self.clone();
		let locale_owned = locale.to_string();
		let op = self
			.flights
			.join_or_begin(locale, move || {
				let epoch = this.epoch_of(&locale_owned);
				this.fetch_and_settle(locale_owned, allow_fallback, epoch)
					.boxed()
			})
			.await;
		op.await
	}

	async fn fetch_and_settle(
		self,
		locale: String,
		allow_fallback: bool,
		epoch: Epoch,
	) -> LoadResult {
		// A caller can register a fresh operation just after a previous one
		// settled and populated the store; don't fetch twice in that case.
		if let Some(catalog) = self.store.get(&locale).await {
			self.settle(&locale, epoch).await;
			return Ok(catalog);
		}

		match self.fetcher.fetch_catalog(&locale).await {
			Ok(catalog) => {
				let catalog = Arc::new(catalog);
				if self.is_current(&locale, epoch) {
					self.store.insert(&locale, Arc::clone(&catalog)).await;
					self.flights.forget(&locale).await;
					debug!(locale = %locale, "Catalog load settled");
				} else {
					debug!(locale = %locale, "Catalog load superseded by invalidation; result discarded");
				}
				Ok(catalog)
			}
			Err(err) => {
				// Clear the pending entry first so a later call may retry.
				self.settle(&locale, epoch).await;

				if allow_fallback && locale != self.base_locale {
					warn!(
						locale = %locale,
						base = %self.base_locale,
						error = %err,
						"Catalog fetch failed; degrading to base-locale catalog"
					);
					// Bounded fallback: the base-locale load never falls
					// back further, even if it is itself missing.
					let base = self.base_locale.clone();
					self.load_inner(&base, false).await
				} else {
					error!(locale = %locale, error = %err, "Catalog fetch failed with no fallback");
					Err(Arc::new(err))
				}
			}
		}
	}

	async fn settle(&self, locale: &str, epoch: Epoch) {
		if self.is_current(locale, epoch) {
			self.flights.forget(locale).await;
		}
	}

	fn is_current(&self, locale: &str, epoch: Epoch) -> bool {
		self.epoch_of(locale) == epoch
	}

	fn epoch_of(&self, locale: &str) -> Epoch {
		let locale_epochs = self
			.locale_epochs
			.lock()
			.unwrap_or_else(std::sync::PoisonError::into_inner);
		Epoch {
			global: self.global_epoch.load(Ordering::SeqCst),
			locale: locale_epochs.get(locale).copied().unwrap_or(0),
		}
	}

	fn bump_locale_epoch(&self, locale: &str) {
		let mut locale_epochs = self
			.locale_epochs
			.lock()
			.unwrap_or_else(std::sync::PoisonError::into_inner);
		*locale_epochs.entry(locale.to_string()).or_insert(0) += 1;
	}
}
