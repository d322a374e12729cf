// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The asset resolution service.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::FutureExt;
use lingo_catalog::SingleFlight;
use lingo_locale::{candidate_paths, FallbackOptions, LocaleRegistry};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::AssetConfig;
use crate::error::{AssetError, Result};
use crate::probe::{AssetMetadata, AssetProber};

/// Above-the-fold assets worth probing at startup.
const CRITICAL_ASSETS: [&str; 4] = ["hero-banner", "logo", "delivery-truck", "restaurant-icon"];

/// Icons with culturally specific variants, consulted before generic
/// resolution.
const ICON_VARIANTS: &[(&str, &[(&str, &str)])] = &[
	(
		"delivery-truck",
		&[
			("en-US", "delivery-truck-us"),
			("en-GB", "delivery-van-uk"),
			("ar", "delivery-motorcycle-ar"),
			("es-MX", "delivery-bike-mx"),
			("nl-NL", "delivery-bike-nl"),
		],
	),
	(
		"payment-card",
		&[
			("en-US", "credit-card-us"),
			("en-GB", "debit-card-uk"),
			("de-DE", "ec-card-de"),
			("nl-NL", "ideal-payment-nl"),
		],
	),
	(
		"restaurant",
		&[
			("en-US", "restaurant-us"),
			("fr-FR", "bistro-fr"),
			("it-IT", "trattoria-it"),
			("es-ES", "tapas-bar-es"),
		],
	),
];

/// One existing localized variant of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetVariant {
	/// `global`, a language, or a region-qualified tag.
	pub locale: String,
	pub path: String,
}

/// Cache occupancy counters, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
	pub cached_resolutions: usize,
	pub preloaded_assets: usize,
	pub in_flight: usize,
}

/// Builder for [`AssetService`].
pub struct AssetServiceBuilder {
	config: AssetConfig,
	registry: LocaleRegistry,
	prober: Option<Arc<dyn AssetProber>>,
}

impl AssetServiceBuilder {
	fn new() -> Self {
		Self {
			config: AssetConfig::default(),
			registry: LocaleRegistry::marketing_default(),
			prober: None,
		}
	}

	pub fn config(mut self, config: AssetConfig) -> Self {
		self.config = config;
		self
	}

	pub fn registry(mut self, registry: LocaleRegistry) -> Self {
		self.registry = registry;
		self
	}

	/// Sets the existence-probe collaborator. Required.
	pub fn prober(mut self, prober: Arc<dyn AssetProber>) -> Self {
		self.prober = Some(prober);
		self
	}

	pub fn build(self) -> Result<AssetService> {
		let prober = self.prober.ok_or(AssetError::MissingProber)?;
		Ok(AssetService {
			inner: Arc::new(Inner {
				config: self.config,
				registry: self.registry,
				prober,
				resolutions: RwLock::new(HashMap::new()),
				preloaded: RwLock::new(HashSet::new()),
				flights: SingleFlight::new(),
			}),
		})
	}
}

struct Inner {
	config: AssetConfig,
	registry: LocaleRegistry,
	prober: Arc<dyn AssetProber>,
	// Resolved paths keyed by `{key}|{locale}|{region}`.
	resolutions: RwLock<HashMap<String, String>>,
	preloaded: RwLock<HashSet<String>>,
	flights: SingleFlight<String>,
}

/// Locale-aware asset path resolution for page bindings.
///
/// Cheap to clone; clones share the caches and in-flight registry.
#[derive(Clone)]
pub struct AssetService {
	inner: Arc<Inner>,
}

impl AssetService {
	pub fn builder() -> AssetServiceBuilder {
		AssetServiceBuilder::new()
	}

	pub fn config(&self) -> &AssetConfig {
		&self.inner.config
	}

	/// Resolves the asset path for `key` at `locale`/`region`.
	///
	/// Walks the fallback chain and returns the first candidate the prober
	/// confirms; when nothing is confirmed the terminal unscoped path comes
	/// back verbatim, so this never fails. Results are cached per
	/// (key, locale, region), and concurrent resolutions of the same asset
	/// share one probe sequence.
	pub async fn resolve_asset_path(
		&self,
		key: &str,
		locale: &str,
		region: Option<&str>,
		options: &FallbackOptions,
	) -> String {
		if key.is_empty() {
			warn!("resolve_asset_path called with an empty key");
		}

		let cache_key = cache_key(key, locale, region);
		if let Some(path) = self.inner.resolutions.read().await.get(&cache_key) {
			return path.clone();
		}

		let this = self.clone();
		let op_cache_key = cache_key.clone();
		let op_key = key.to_string();
		let op_locale = locale.to_string();
		let op_region = region.map(String::from);
		let op_options = options.clone();
		let op = self
			.inner
			.flights
			.join_or_begin(&cache_key, move || {
				this.resolve_and_settle(op_cache_key, op_key, op_locale, op_region, op_options)
					.boxed()
			})
			.await;
		op.await
	}

	async fn resolve_and_settle(
		self,
		cache_key: String,
		key: String,
		locale: String,
		region: Option<String>,
		options: FallbackOptions,
	) -> String {
		if let Some(path) = self.inner.resolutions.read().await.get(&cache_key) {
			self.inner.flights.forget(&cache_key).await;
			return path.clone();
		}

		let chain = candidate_paths(
			&key,
			&locale,
			region.as_deref(),
			&options,
			&self.inner.config.base_path,
		);
		let (candidates, terminal) = chain.split_at(chain.len() - 1);

		let mut resolved = None;
		for path in candidates {
			if self.inner.prober.exists(path).await {
				resolved = Some(path.clone());
				break;
			}
		}
		// The terminal path is returned regardless of existence; rendering
		// a placeholder for a genuinely missing asset is the page's call.
		let resolved = resolved.unwrap_or_else(|| terminal[0].clone());

		self.inner
			.resolutions
			.write()
			.await
			.insert(cache_key.clone(), resolved.clone());
		self.inner.flights.forget(&cache_key).await;
		debug!(key = %key, locale = %locale, path = %resolved, "Asset resolved");
		resolved
	}

	/// Resolves an icon, preferring culturally specific variants for the
	/// region or language before generic resolution.
	pub async fn resolve_icon(&self, icon_key: &str, locale: &str, region: Option<&str>) -> String {
		let options = FallbackOptions::default();
		if let Some((_, mapping)) = ICON_VARIANTS.iter().find(|(key, _)| *key == icon_key) {
			if let Some(region) = region {
				if let Some((_, mapped)) = mapping.iter().find(|(tag, _)| *tag == region) {
					return self
						.resolve_asset_path(mapped, locale, Some(region), &options)
						.await;
				}
			}
			if let Some((_, mapped)) = mapping.iter().find(|(tag, _)| *tag == locale) {
				return self.resolve_asset_path(mapped, locale, None, &options).await;
			}
		}
		self.resolve_asset_path(icon_key, locale, region, &options).await
	}

	/// Every existing localized variant of `key` across the registry's
	/// languages and region tags, with the global form first.
	pub async fn asset_variants(&self, key: &str) -> Vec<AssetVariant> {
		let base_path = &self.inner.config.base_path;
		let mut variants = vec![AssetVariant {
			locale: "global".to_string(),
			path: format!("{base_path}/{key}"),
		}];

		let languages: Vec<String> = self
			.inner
			.registry
			.languages()
			.into_iter()
			.map(String::from)
			.collect();
		let region_tags: Vec<String> = self
			.inner
			.registry
			.region_tags()
			.into_iter()
			.map(String::from)
			.collect();

		for scope in languages.into_iter().chain(region_tags) {
			let path = format!("{base_path}/{scope}/{key}");
			if self.inner.prober.exists(&path).await {
				variants.push(AssetVariant {
					locale: scope,
					path,
				});
			}
		}
		variants
	}

	/// Resolves and probes `keys` concurrently, recording the ones that
	/// exist as preloaded. Failures are logged and skipped.
	pub async fn preload(&self, keys: &[String], locale: &str, region: Option<&str>) {
		let tasks = keys.iter().map(|key| {
			let this = self.clone();
			async move {
				let cache_key = cache_key(key, locale, region);
				if this.inner.preloaded.read().await.contains(&cache_key) {
					return;
				}
				let path = this
					.resolve_asset_path(key, locale, region, &FallbackOptions::default())
					.await;
				if this.inner.prober.exists(&path).await {
					this.inner.preloaded.write().await.insert(cache_key);
				} else {
					warn!(key = %key, path = %path, "Failed to preload asset");
				}
			}
		});
		futures::future::join_all(tasks).await;
	}

	/// Preloads the critical above-the-fold set, when enabled.
	pub async fn preload_critical(&self, locale: &str, region: Option<&str>) {
		if !self.inner.config.preload_critical {
			return;
		}
		let keys: Vec<String> = CRITICAL_ASSETS.iter().map(|k| k.to_string()).collect();
		self.preload(&keys, locale, region).await;
		info!(locale, "Critical assets preloaded");
	}

	/// Metadata for the asset at `path`, when the prober can supply it.
	pub async fn asset_metadata(&self, path: &str) -> Option<AssetMetadata> {
		self.inner.prober.metadata(path).await
	}

	/// Whether a resolution for this asset is currently in flight.
	pub async fn is_resolving(&self, key: &str, locale: &str, region: Option<&str>) -> bool {
		self.inner.flights.contains(&cache_key(key, locale, region)).await
	}

	/// Drops cached resolutions and preload marks.
	///
	/// With an `asset_key`, only that asset's entries are dropped,
	/// narrowed further when a `locale` is given; with `None`, everything
	/// is dropped. In-flight resolutions for the affected entries are
	/// forgotten so the next request probes afresh.
	#[tracing::instrument(level = "info", skip(self))]
	pub async fn invalidate(&self, asset_key: Option<&str>, locale: Option<&str>) {
		match asset_key {
			Some(key) => {
				let matches =
					|cache_key: &str| cache_key_matches(cache_key, key, locale);
				self.inner
					.resolutions
					.write()
					.await
					.retain(|cache_key, _| !matches(cache_key));
				self.inner
					.preloaded
					.write()
					.await
					.retain(|cache_key| !matches(cache_key));
				self.inner.flights.forget_where(matches).await;
			}
			None => {
				self.inner.resolutions.write().await.clear();
				self.inner.preloaded.write().await.clear();
				self.inner.flights.forget_all().await;
			}
		}
	}

	/// Cache occupancy counters.
	pub async fn cache_stats(&self) -> CacheStats {
		CacheStats {
			cached_resolutions: self.inner.resolutions.read().await.len(),
			preloaded_assets: self.inner.preloaded.read().await.len(),
			in_flight: self.inner.flights.len().await,
		}
	}
}

fn cache_key(key: &str, locale: &str, region: Option<&str>) -> String {
	format!("{key}|{locale}|{}", region.unwrap_or(""))
}

fn cache_key_matches(cache_key: &str, key: &str, locale: Option<&str>) -> bool {
	let mut parts = cache_key.splitn(3, '|');
	let cached_key = parts.next();
	let cached_locale = parts.next();
	cached_key == Some(key) && locale.map_or(true, |want| cached_locale == Some(want))
}
