// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The translation service and its active-locale state machine.

use std::collections::BTreeMap;
use std::sync::Arc;

use lingo_catalog::{
	interpolate, Catalog, CatalogFetcher, CatalogStore, LoadCoordinator,
};
use lingo_locale::{
	candidate_chain, resolve_locale, Candidate, FallbackOptions, LocaleInfo, LocaleRegistry,
	LocaleTag, Scope, DEFAULT_LOCALE,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{Result, TranslateError};
use crate::listeners::{ListenerSet, Subscription};
use crate::preferences::{MemoryPreferenceStore, PreferenceStore};

/// Store key of the shared cross-locale catalog.
///
/// Strings every locale has in common live here; the global step of the
/// fallback chain consults this catalog rather than any locale's.
pub const GLOBAL_CATALOG: &str = "global";

/// Builder for [`TranslationService`].
pub struct TranslationServiceBuilder {
	registry: LocaleRegistry,
	base_locale: String,
	fetcher: Option<Arc<dyn CatalogFetcher>>,
	preferences: Option<Arc<dyn PreferenceStore>>,
}

impl TranslationServiceBuilder {
	fn new() -> Self {
		Self {
			registry: LocaleRegistry::marketing_default(),
			base_locale: DEFAULT_LOCALE.to_string(),
			fetcher: None,
			preferences: None,
		}
	}

	/// Sets the supported-locale registry. Defaults to the marketing set.
	pub fn registry(mut self, registry: LocaleRegistry) -> Self {
		self.registry = registry;
		self
	}

	/// Sets the base locale, the terminal fallback. Defaults to `en`.
	pub fn base_locale(mut self, locale: impl Into<String>) -> Self {
		self.base_locale = locale.into();
		self
	}

	/// Sets the catalog fetch collaborator. Required.
	pub fn fetcher(mut self, fetcher: Arc<dyn CatalogFetcher>) -> Self {
		self.fetcher = Some(fetcher);
		self
	}

	/// Sets the preference store. Defaults to an in-memory store.
	pub fn preferences(mut self, preferences: Arc<dyn PreferenceStore>) -> Self {
		self.preferences = Some(preferences);
		self
	}

	/// Builds the service.
	///
	/// Fails when no fetcher was supplied or the base locale is not in the
	/// registry.
	pub fn build(self) -> Result<TranslationService> {
		let fetcher = self.fetcher.ok_or(TranslateError::MissingFetcher)?;
		if !self.registry.is_supported(&self.base_locale) {
			return Err(TranslateError::UnsupportedLocale(self.base_locale));
		}

		let store = Arc::new(CatalogStore::new());
		let coordinator =
			LoadCoordinator::new(Arc::clone(&store), fetcher, self.base_locale.clone());

		Ok(TranslationService {
			registry: self.registry,
			base_locale: self.base_locale,
			store,
			coordinator,
			preferences: self
				.preferences
				.unwrap_or_else(|| Arc::new(MemoryPreferenceStore::new())),
			listeners: ListenerSet::new(),
			current: RwLock::new(None),
		})
	}
}

/// Locale-aware translation for page bindings.
///
/// State machine: `Uninitialized → Active(locale)`. [`init`](Self::init)
/// performs the first transition; [`set_locale`](Self::set_locale) switches
/// between active locales and rolls back on load failure, so the service is
/// never left pointing at a locale whose load did not complete.
pub struct TranslationService {
	registry: LocaleRegistry,
	base_locale: String,
	store: Arc<CatalogStore>,
	coordinator: LoadCoordinator,
	preferences: Arc<dyn PreferenceStore>,
	listeners: ListenerSet,
	current: RwLock<Option<String>>,
}

impl TranslationService {
	pub fn builder() -> TranslationServiceBuilder {
		TranslationServiceBuilder::new()
	}

	/// Seeds the active locale and loads its catalog.
	///
	/// The initial locale is the persisted preference when it is still
	/// supported, else the first supported detection candidate (full tag,
	/// then bare language), else the base locale. The shared global catalog
	/// is loaded best-effort alongside.
	///
	/// Returns the locale that became active.
	#[tracing::instrument(level = "info", skip(self))]
	pub async fn init(&self, detected: &[String]) -> Result<String> {
		let stored = self.preferences.load();
		let initial = resolve_locale(&self.registry, stored.as_deref(), detected, &self.base_locale);

		self.load_or_error(&initial).await?;
		if let Err(err) = self.coordinator.load(GLOBAL_CATALOG).await {
			warn!(error = %err, "Global catalog unavailable");
		}

		*self.current.write().await = Some(initial.clone());
		info!(locale = %initial, "Translation service initialized");
		Ok(initial)
	}

	/// Tears the service down: evicts every catalog, forgets in-flight
	/// loads, drops listeners, and returns to the uninitialized state.
	pub async fn shutdown(&self) {
		self.coordinator.invalidate_all().await;
		self.listeners.clear();
		*self.current.write().await = None;
		info!("Translation service shut down");
	}

	/// Switches the active locale.
	///
	/// No-op when `locale` is already active. Fails fast for unsupported
	/// locales. Otherwise the catalog is loaded first; only on success does
	/// the state transition, the preference persist, and listeners fire.
	/// On failure the previous locale stays active.
	#[tracing::instrument(level = "info", skip(self))]
	pub async fn set_locale(&self, locale: &str) -> Result<()> {
		if !self.registry.is_supported(locale) {
			return Err(TranslateError::UnsupportedLocale(locale.to_string()));
		}
		if self.current.read().await.as_deref() == Some(locale) {
			debug!(locale, "Locale already active");
			return Ok(());
		}

		self.load_or_error(locale).await?;

		*self.current.write().await = Some(locale.to_string());
		if let Err(err) = self.preferences.store(locale) {
			warn!(locale, error = %err, "Failed to persist locale preference");
		}
		self.listeners.notify(locale);
		info!(locale, "Active locale changed");
		Ok(())
	}

	/// The active locale, if initialized.
	pub async fn current_locale(&self) -> Option<String> {
		self.current.read().await.clone()
	}

	/// Registry metadata for the active locale.
	pub async fn current_locale_info(&self) -> Option<LocaleInfo> {
		let current = self.current.read().await;
		current.as_deref().and_then(|l| self.registry.info(l)).cloned()
	}

	/// The supported-locale registry.
	pub fn registry(&self) -> &LocaleRegistry {
		&self.registry
	}

	/// Whether the active locale reads right-to-left.
	pub async fn is_rtl(&self) -> bool {
		match self.current.read().await.as_deref() {
			Some(locale) => self.registry.is_rtl(locale),
			None => false,
		}
	}

	/// Formats `amount` in the active locale's currency.
	pub async fn format_currency(&self, amount: f64) -> Option<String> {
		let current = self.current.read().await;
		current
			.as_deref()
			.and_then(|l| self.registry.format_currency(l, amount))
	}

	/// Translates `key`, substituting `{name}` placeholders from `params`.
	///
	/// Never fails: the fallback chain for the active locale is walked over
	/// the already-loaded catalogs, and when every step misses the literal
	/// key comes back and a missing-translation warning is logged. No I/O
	/// happens here; loading is `init`/`set_locale`/`preload`'s job.
	pub async fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
		if key.is_empty() {
			warn!("translate called with an empty key");
			return String::new();
		}

		for candidate in self.lookup_chain(key).await {
			if let Some(catalog) = self.catalog_for(&candidate.scope).await {
				if let Some(text) = catalog.lookup(&candidate.key) {
					return interpolate(text, params);
				}
			}
		}

		warn!(key, "Missing translation");
		key.to_string()
	}

	/// Whether any step of the fallback chain has a translation for `key`.
	pub async fn has_translation(&self, key: &str) -> bool {
		if key.is_empty() {
			return false;
		}
		for candidate in self.lookup_chain(key).await {
			if let Some(catalog) = self.catalog_for(&candidate.scope).await {
				if catalog.contains(&candidate.key) {
					return true;
				}
			}
		}
		false
	}

	/// Every translation under the dot-path `prefix`, merged across the
	/// fallback chain with earlier (more specific) steps winning.
	pub async fn namespace(&self, prefix: &str) -> BTreeMap<String, String> {
		let mut merged = BTreeMap::new();
		for candidate in self.lookup_chain(prefix).await.iter().rev() {
			if let Some(catalog) = self.catalog_for(&candidate.scope).await {
				merged.extend(catalog.namespace(prefix));
			}
		}
		merged
	}

	/// Loads catalogs for `locales` concurrently.
	///
	/// Individual failures degrade or are logged; completion order between
	/// locales is unspecified.
	pub async fn preload(&self, locales: &[String]) {
		let loads = locales.iter().map(|locale| {
			let coordinator = self.coordinator.clone();
			async move { (locale, coordinator.load(locale).await) }
		});
		for (locale, result) in futures::future::join_all(loads).await {
			if let Err(err) = result {
				warn!(locale = %locale, error = %err, "Preload failed");
			}
		}
	}

	/// Preloads every supported locale.
	pub async fn preload_all(&self) {
		let locales: Vec<String> = self.registry.available().map(String::from).collect();
		self.preload(&locales).await;
	}

	/// Whether a catalog load for `locale` is currently in flight.
	pub async fn is_loading(&self, locale: &str) -> bool {
		self.coordinator.is_loading(locale).await
	}

	/// Registers a locale-change listener; fires after every successful
	/// locale switch and after an invalidation reload of the active locale.
	pub fn subscribe<F>(&self, listener: F) -> Subscription
	where
		F: Fn(&str) + Send + Sync + 'static,
	{
		self.listeners.subscribe(listener)
	}

	/// Removes a previously registered listener.
	pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
		self.listeners.unsubscribe(subscription)
	}

	/// Evicts one locale's catalog and in-flight load; when it is the
	/// active locale, reloads it and notifies listeners.
	///
	/// Eviction completes before the reload starts, so the reload can never
	/// be satisfied by the stale entry.
	#[tracing::instrument(level = "info", skip(self))]
	pub async fn invalidate_locale(&self, locale: &str) -> Result<()> {
		self.coordinator.invalidate(locale).await;

		if self.current.read().await.as_deref() == Some(locale) {
			self.load_or_error(locale).await?;
			self.listeners.notify(locale);
		}
		Ok(())
	}

	/// Evicts every catalog and in-flight load, then reloads the active
	/// locale (and the global catalog, best-effort) and notifies listeners.
	#[tracing::instrument(level = "info", skip(self))]
	pub async fn invalidate_all(&self) -> Result<()> {
		self.coordinator.invalidate_all().await;

		let active = self.current.read().await.clone();
		if let Some(active) = active {
			self.load_or_error(&active).await?;
			if let Err(err) = self.coordinator.load(GLOBAL_CATALOG).await {
				warn!(error = %err, "Global catalog unavailable after invalidation");
			}
			self.listeners.notify(&active);
		}
		Ok(())
	}

	async fn load_or_error(&self, locale: &str) -> Result<Arc<Catalog>> {
		self.coordinator
			.load(locale)
			.await
			.map_err(|cause| TranslateError::Load {
				locale: locale.to_string(),
				cause,
			})
	}

	/// The fallback chain for the active locale, without the terminal
	/// literal-key step.
	async fn lookup_chain(&self, key: &str) -> Vec<Candidate> {
		let Some(active) = self.current.read().await.clone() else {
			return Vec::new();
		};

		let (language, region) = match LocaleTag::parse(&active) {
			Ok(tag) if tag.has_region() => (tag.language().to_string(), Some(active.clone())),
			Ok(tag) => (tag.language().to_string(), None),
			Err(_) => (active.clone(), None),
		};

		let mut chain = candidate_chain(
			key,
			&language,
			region.as_deref(),
			&FallbackOptions::default(),
		);
		// The terminal step is the literal key, not a catalog lookup.
		chain.pop();
		chain
	}

	async fn catalog_for(&self, scope: &Scope) -> Option<Arc<Catalog>> {
		match scope {
			Scope::Region(region) => self.store.get(region).await,
			Scope::Language(language) => self.store.get(language).await,
			Scope::Global => self.store.get(GLOBAL_CATALOG).await,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;
	use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
	use std::sync::Mutex;

	use async_trait::async_trait;
	use lingo_catalog::CatalogError;
	use lingo_locale::{CurrencyInfo, Direction};

	use super::*;

	/// Serves canned catalog versions per locale and counts fetches.
	/// Locales without an entry fail with a 404-shaped error; flipping
	/// `fail_everything` makes every fetch fail with a 503.
	struct MockFetcher {
		catalogs: HashMap<String, Vec<String>>,
		counts: Mutex<HashMap<String, usize>>,
		fail_all: AtomicBool,
	}

	impl MockFetcher {
		fn new(catalogs: &[(&str, &str)]) -> Self {
			let versioned: Vec<(&str, &[&str])> = Vec::new();
			let mut fetcher = Self::with_versions(&versioned);
			for (locale, json) in catalogs {
				fetcher
					.catalogs
					.insert(locale.to_string(), vec![json.to_string()]);
			}
			fetcher
		}

		fn with_versions(catalogs: &[(&str, &[&str])]) -> Self {
			Self {
				catalogs: catalogs
					.iter()
					.map(|(locale, versions)| {
						(
							locale.to_string(),
							versions.iter().map(|v| v.to_string()).collect(),
						)
					})
					.collect(),
				counts: Mutex::new(HashMap::new()),
				fail_all: AtomicBool::new(false),
			}
		}

		fn count(&self, locale: &str) -> usize {
			self.counts
				.lock()
				.unwrap()
				.get(locale)
				.copied()
				.unwrap_or(0)
		}

		fn fail_everything(&self) {
			self.fail_all.store(true, Ordering::SeqCst);
		}
	}

	#[async_trait]
	impl CatalogFetcher for MockFetcher {
		async fn fetch_catalog(&self, locale: &str) -> lingo_catalog::Result<Catalog> {
			let index = {
				let mut counts = self.counts.lock().unwrap();
				let count = counts.entry(locale.to_string()).or_insert(0);
				let index = *count;
				*count += 1;
				index
			};
			if self.fail_all.load(Ordering::SeqCst) {
				return Err(CatalogError::Status {
					locale: locale.to_string(),
					status: 503,
				});
			}
			match self.catalogs.get(locale) {
				Some(versions) => {
					let json = &versions[index.min(versions.len() - 1)];
					Ok(Catalog::from_json_str(json).unwrap())
				}
				None => Err(CatalogError::Status {
					locale: locale.to_string(),
					status: 404,
				}),
			}
		}
	}

	fn service(fetcher: Arc<MockFetcher>) -> TranslationService {
		TranslationService::builder()
			.fetcher(fetcher)
			.build()
			.unwrap()
	}

	fn service_with_preferences(
		fetcher: Arc<MockFetcher>,
		preferences: Arc<MemoryPreferenceStore>,
	) -> TranslationService {
		TranslationService::builder()
			.fetcher(fetcher)
			.preferences(preferences)
			.build()
			.unwrap()
	}

	/// A minimal registry with bare `en` and `fr` entries.
	fn en_fr_registry() -> LocaleRegistry {
		let currency = || CurrencyInfo::new("USD", "$", "{symbol}{amount}");
		LocaleRegistry::new(vec![
			LocaleInfo::new("en", "English", "English", Direction::Ltr, currency(), "Global", "🌐"),
			LocaleInfo::new("fr", "French", "Français", Direction::Ltr, currency(), "France", "🇫🇷"),
		])
	}

	#[test]
	fn test_builder_requires_a_fetcher() {
		let result = TranslationService::builder().build();
		assert!(matches!(result, Err(TranslateError::MissingFetcher)));
	}

	#[test]
	fn test_builder_rejects_unsupported_base_locale() {
		let fetcher = Arc::new(MockFetcher::new(&[]));
		let result = TranslationService::builder()
			.fetcher(fetcher)
			.base_locale("xx-XX")
			.build();
		assert!(matches!(result, Err(TranslateError::UnsupportedLocale(_))));
	}

	#[tokio::test]
	async fn test_init_prefers_stored_preference() {
		let fetcher = Arc::new(MockFetcher::new(&[
			("en", r#"{"k": "v"}"#),
			("fr-CA", r#"{"k": "v"}"#),
		]));
		let preferences = Arc::new(MemoryPreferenceStore::with_preference("fr-CA"));
		let service = service_with_preferences(Arc::clone(&fetcher), preferences);

		let active = service.init(&["de-DE".to_string()]).await.unwrap();
		assert_eq!(active, "fr-CA");
		assert_eq!(service.current_locale().await, Some("fr-CA".to_string()));
		assert_eq!(fetcher.count("fr-CA"), 1);
	}

	#[tokio::test]
	async fn test_init_detection_falls_back_to_language_subtag() {
		let fetcher = Arc::new(MockFetcher::new(&[("en", r#"{"k": "v"}"#)]));
		let service = service(Arc::clone(&fetcher));

		// en-IE is not served; bare en is.
		let active = service.init(&["en-IE".to_string()]).await.unwrap();
		assert_eq!(active, "en");
	}

	#[tokio::test]
	async fn test_translate_before_init_returns_key() {
		let fetcher = Arc::new(MockFetcher::new(&[]));
		let service = service(fetcher);

		assert_eq!(service.translate("menu.title", &[]).await, "menu.title");
	}

	#[tokio::test]
	async fn test_translate_region_step_wins_over_language() {
		let fetcher = Arc::new(MockFetcher::new(&[
			("en", r#"{"k": "v"}"#),
			("fr-CA", r#"{"menu": {"title": "Menu (CA)"}}"#),
			("fr", r#"{"menu": {"title": "Menu (FR)", "subtitle": "Plats"}}"#),
		]));
		let preferences = Arc::new(MemoryPreferenceStore::with_preference("fr-CA"));
		let service = service_with_preferences(fetcher, preferences);

		service.init(&[]).await.unwrap();
		service.preload(&["fr".to_string()]).await;

		assert_eq!(service.translate("menu.title", &[]).await, "Menu (CA)");
		// Missing in fr-CA, found at the language step.
		assert_eq!(service.translate("menu.subtitle", &[]).await, "Plats");
	}

	#[tokio::test]
	async fn test_translate_missing_key_returns_literal_key() {
		// Active locale fr with no French catalog loaded and the English
		// catalog cached. The lookup must not borrow the base locale's
		// text; it degrades to the literal key.
		let fetcher = Arc::new(MockFetcher::new(&[("en", r#"{"menu": {"title": "Menu"}}"#)]));
		let preferences = Arc::new(MemoryPreferenceStore::with_preference("fr"));
		let service = TranslationService::builder()
			.registry(en_fr_registry())
			.fetcher(Arc::clone(&fetcher))
			.preferences(preferences)
			.build()
			.unwrap();

		// fr fails to fetch and degrades to the en catalog, which is not
		// cached under fr.
		service.init(&[]).await.unwrap();
		assert_eq!(service.current_locale().await, Some("fr".to_string()));

		assert_eq!(service.translate("menu.title", &[]).await, "menu.title");
		assert!(!service.has_translation("menu.title").await);
	}

	#[tokio::test]
	async fn test_translate_interpolates_params() {
		let fetcher = Arc::new(MockFetcher::new(&[(
			"en",
			r#"{"greeting": "Welcome, {name}!"}"#,
		)]));
		let service = service(fetcher);
		service.init(&[]).await.unwrap();

		assert_eq!(
			service.translate("greeting", &[("name", "Ada")]).await,
			"Welcome, Ada!",
		);
	}

	#[tokio::test]
	async fn test_translate_consults_global_catalog() {
		let fetcher = Arc::new(MockFetcher::new(&[
			("en", r#"{"menu": {"title": "Menu"}}"#),
			("global", r#"{"footer": {"legal": "All rights reserved"}}"#),
		]));
		let service = service(fetcher);
		service.init(&[]).await.unwrap();

		assert_eq!(
			service.translate("footer.legal", &[]).await,
			"All rights reserved",
		);
	}

	#[tokio::test]
	async fn test_set_locale_is_idempotent() {
		let fetcher = Arc::new(MockFetcher::new(&[("en", r#"{"k": "v"}"#)]));
		let service = service(Arc::clone(&fetcher));
		service.init(&[]).await.unwrap();

		let notifications = Arc::new(AtomicUsize::new(0));
		{
			let notifications = Arc::clone(&notifications);
			service.subscribe(move |_| {
				notifications.fetch_add(1, Ordering::SeqCst);
			});
		}

		service.set_locale("en").await.unwrap();

		assert_eq!(fetcher.count("en"), 1);
		assert_eq!(notifications.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn test_set_locale_rejects_unsupported_locale() {
		let fetcher = Arc::new(MockFetcher::new(&[("en", r#"{"k": "v"}"#)]));
		let service = service(Arc::clone(&fetcher));
		service.init(&[]).await.unwrap();

		let err = service.set_locale("xx-XX").await.unwrap_err();
		assert!(matches!(err, TranslateError::UnsupportedLocale(_)));
		assert_eq!(service.current_locale().await, Some("en".to_string()));
		assert_eq!(fetcher.count("xx-XX"), 0);
	}

	#[tokio::test]
	async fn test_set_locale_persists_and_notifies_on_success() {
		let fetcher = Arc::new(MockFetcher::new(&[
			("en", r#"{"k": "v"}"#),
			("de-DE", r#"{"k": "v"}"#),
		]));
		let preferences = Arc::new(MemoryPreferenceStore::new());
		let service = service_with_preferences(fetcher, Arc::clone(&preferences));
		service.init(&[]).await.unwrap();

		let seen = Arc::new(Mutex::new(Vec::new()));
		{
			let seen = Arc::clone(&seen);
			service.subscribe(move |locale| {
				seen.lock().unwrap().push(locale.to_string());
			});
		}

		service.set_locale("de-DE").await.unwrap();

		assert_eq!(service.current_locale().await, Some("de-DE".to_string()));
		assert_eq!(preferences.load(), Some("de-DE".to_string()));
		assert_eq!(*seen.lock().unwrap(), vec!["de-DE"]);
	}

	#[tokio::test]
	async fn test_set_locale_rolls_back_on_load_failure() {
		let fetcher = Arc::new(MockFetcher::new(&[("en", r#"{"k": "v"}"#)]));
		let preferences = Arc::new(MemoryPreferenceStore::new());
		let service = service_with_preferences(Arc::clone(&fetcher), Arc::clone(&preferences));
		service.init(&[]).await.unwrap();

		let notifications = Arc::new(AtomicUsize::new(0));
		{
			let notifications = Arc::clone(&notifications);
			service.subscribe(move |_| {
				notifications.fetch_add(1, Ordering::SeqCst);
			});
		}

		// Every fetch now fails, and the cached base catalog is gone, so
		// the switch cannot complete even degraded.
		fetcher.fail_everything();
		let _ = service.invalidate_all().await;

		let err = service.set_locale("de-DE").await.unwrap_err();
		assert!(matches!(err, TranslateError::Load { .. }));

		// No partial transition: state, preference, and listeners untouched.
		assert_eq!(service.current_locale().await, Some("en".to_string()));
		assert_eq!(preferences.load(), None);
		assert_eq!(notifications.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn test_invalidate_active_locale_evicts_then_reloads() {
		let fetcher = Arc::new(MockFetcher::with_versions(&[(
			"en",
			&[r#"{"k": "one"}"#, r#"{"k": "two"}"#][..],
		)]));
		let service = service(Arc::clone(&fetcher));
		service.init(&[]).await.unwrap();
		assert_eq!(service.translate("k", &[]).await, "one");

		let notifications = Arc::new(AtomicUsize::new(0));
		{
			let notifications = Arc::clone(&notifications);
			service.subscribe(move |_| {
				notifications.fetch_add(1, Ordering::SeqCst);
			});
		}

		service.invalidate_locale("en").await.unwrap();

		// The reload fetched fresh data; a cache hit would still serve "one".
		assert_eq!(service.translate("k", &[]).await, "two");
		assert_eq!(fetcher.count("en"), 2);
		assert_eq!(notifications.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn test_invalidate_inactive_locale_does_not_reload_or_notify() {
		let fetcher = Arc::new(MockFetcher::new(&[
			("en", r#"{"k": "v"}"#),
			("de-DE", r#"{"k": "v"}"#),
		]));
		let service = service(Arc::clone(&fetcher));
		service.init(&[]).await.unwrap();
		service.preload(&["de-DE".to_string()]).await;

		let notifications = Arc::new(AtomicUsize::new(0));
		{
			let notifications = Arc::clone(&notifications);
			service.subscribe(move |_| {
				notifications.fetch_add(1, Ordering::SeqCst);
			});
		}

		service.invalidate_locale("de-DE").await.unwrap();

		assert_eq!(fetcher.count("de-DE"), 1);
		assert_eq!(notifications.load(Ordering::SeqCst), 0);
		// The evicted catalog is refetched on the next explicit load.
		service.preload(&["de-DE".to_string()]).await;
		assert_eq!(fetcher.count("de-DE"), 2);
	}

	#[tokio::test]
	async fn test_invalidate_all_reloads_active_and_global() {
		let fetcher = Arc::new(MockFetcher::with_versions(&[
			("en", &[r#"{"k": "one"}"#, r#"{"k": "two"}"#][..]),
			("global", &[r#"{"g": "shared"}"#][..]),
		]));
		let service = service(Arc::clone(&fetcher));
		service.init(&[]).await.unwrap();

		service.invalidate_all().await.unwrap();

		assert_eq!(service.translate("k", &[]).await, "two");
		assert_eq!(service.translate("g", &[]).await, "shared");
		assert_eq!(fetcher.count("global"), 2);
	}

	#[tokio::test]
	async fn test_namespace_merges_chain_with_specific_steps_winning() {
		let fetcher = Arc::new(MockFetcher::new(&[
			("en", r#"{"k": "v"}"#),
			("fr-CA", r#"{"menu": {"title": "Menu (CA)"}}"#),
			("fr", r#"{"menu": {"title": "Menu (FR)", "subtitle": "Plats"}}"#),
		]));
		let preferences = Arc::new(MemoryPreferenceStore::with_preference("fr-CA"));
		let service = service_with_preferences(fetcher, preferences);
		service.init(&[]).await.unwrap();
		service.preload(&["fr".to_string()]).await;

		let namespace = service.namespace("menu").await;
		assert_eq!(
			namespace.get("menu.title").map(String::as_str),
			Some("Menu (CA)"),
		);
		assert_eq!(
			namespace.get("menu.subtitle").map(String::as_str),
			Some("Plats"),
		);
	}

	#[tokio::test]
	async fn test_locale_metadata_passthrough() {
		let fetcher = Arc::new(MockFetcher::new(&[
			("en", r#"{"k": "v"}"#),
			("en-GB", r#"{"k": "v"}"#),
		]));
		let service = service(fetcher);
		service.init(&[]).await.unwrap();
		service.set_locale("en-GB").await.unwrap();

		let info = service.current_locale_info().await.unwrap();
		assert_eq!(info.code, "en-GB");
		assert!(!service.is_rtl().await);
		assert_eq!(service.format_currency(12.5).await, Some("£12.50".to_string()));
	}

	#[tokio::test]
	async fn test_shutdown_returns_to_uninitialized() {
		let fetcher = Arc::new(MockFetcher::new(&[("en", r#"{"menu": {"title": "Menu"}}"#)]));
		let service = service(fetcher);
		service.init(&[]).await.unwrap();
		service.subscribe(|_| {});

		service.shutdown().await;

		assert_eq!(service.current_locale().await, None);
		assert_eq!(service.translate("menu.title", &[]).await, "menu.title");
	}

	#[tokio::test]
	async fn test_preload_tolerates_individual_failures() {
		let fetcher = Arc::new(MockFetcher::new(&[
			("en", r#"{"k": "v"}"#),
			("de-DE", r#"{"k": "v"}"#),
		]));
		let service = service(Arc::clone(&fetcher));
		service.init(&[]).await.unwrap();

		service
			.preload(&["de-DE".to_string(), "sv-SE".to_string()])
			.await;

		assert_eq!(fetcher.count("de-DE"), 1);
		// The missing locale degraded without failing the batch.
		assert_eq!(fetcher.count("sv-SE"), 1);
		service.set_locale("de-DE").await.unwrap();
		assert_eq!(fetcher.count("de-DE"), 1);
	}
}
