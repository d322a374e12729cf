// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The catalog fetch collaborator.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::tree::Catalog;

/// Environment variable naming the catalog endpoint base URL.
pub const TRANSLATIONS_URL_ENV: &str = "LINGO_TRANSLATIONS_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the catalog for one locale from wherever catalogs live.
///
/// Injected into the load coordinator; tests substitute their own
/// implementations.
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
	async fn fetch_catalog(&self, locale: &str) -> Result<Catalog>;
}

/// Fetches catalogs over HTTP from `{base_url}/{locale}.json`.
pub struct HttpCatalogFetcher {
	client: reqwest::Client,
	base_url: String,
}

impl HttpCatalogFetcher {
	/// Creates a fetcher for catalogs under `base_url`.
	pub fn new(base_url: impl Into<String>) -> Self {
		let client = reqwest::Client::builder()
			.timeout(REQUEST_TIMEOUT)
			.build()
			.expect("failed to build HTTP client");
		let mut base_url = base_url.into();
		while base_url.ends_with('/') {
			base_url.pop();
		}
		Self { client, base_url }
	}

	/// Creates a fetcher from `LINGO_TRANSLATIONS_URL`.
	pub fn from_env() -> Result<Self> {
		let base_url = std::env::var(TRANSLATIONS_URL_ENV)
			.map_err(|_| CatalogError::NotConfigured(TRANSLATIONS_URL_ENV))?;
		if base_url.is_empty() {
			return Err(CatalogError::NotConfigured(TRANSLATIONS_URL_ENV));
		}
		Ok(Self::new(base_url))
	}

	fn catalog_url(&self, locale: &str) -> String {
		format!("{}/{locale}.json", self.base_url)
	}
}

#[async_trait]
impl CatalogFetcher for HttpCatalogFetcher {
	async fn fetch_catalog(&self, locale: &str) -> Result<Catalog> {
		let url = self.catalog_url(locale);
		debug!(locale, url = %url, "Fetching catalog");

		let response = self
			.client
			.get(&url)
			.send()
			.await
			.map_err(|source| CatalogError::Request {
				locale: locale.to_string(),
				source,
			})?;

		let status = response.status();
		if !status.is_success() {
			return Err(CatalogError::Status {
				locale: locale.to_string(),
				status: status.as_u16(),
			});
		}

		let body = response
			.text()
			.await
			.map_err(|source| CatalogError::Request {
				locale: locale.to_string(),
				source,
			})?;

		let catalog = Catalog::from_json_str(&body).map_err(|source| CatalogError::Parse {
			locale: locale.to_string(),
			source,
		})?;

		debug!(locale, "Catalog fetched");
		Ok(catalog)
	}
}
