// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Asset existence probing.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Lightweight metadata for an asset, when the backing store exposes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMetadata {
	pub content_type: Option<String>,
	pub content_length: Option<u64>,
}

/// Answers "does an asset exist at this path?".
///
/// Injected into the asset service; a probe failure (network error,
/// timeout) reads as "absent" so resolution can move on down the chain.
#[async_trait]
pub trait AssetProber: Send + Sync {
	async fn exists(&self, path: &str) -> bool;

	/// Metadata for the asset at `path`, when available.
	async fn metadata(&self, _path: &str) -> Option<AssetMetadata> {
		None
	}
}

/// Probes assets with HTTP `HEAD` requests.
///
/// Paths that are already absolute URLs are probed directly; rooted paths
/// (`/assets/...`) are resolved against the configured origin.
pub struct HttpAssetProber {
	client: reqwest::Client,
	origin: Option<String>,
}

impl HttpAssetProber {
	pub fn new() -> Self {
		let client = reqwest::Client::builder()
			.timeout(PROBE_TIMEOUT)
			.build()
			.expect("failed to build HTTP client");
		Self {
			client,
			origin: None,
		}
	}

	/// Sets the origin rooted paths are probed against.
	pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
		let mut origin = origin.into();
		while origin.ends_with('/') {
			origin.pop();
		}
		self.origin = Some(origin);
		self
	}

	fn url(&self, path: &str) -> String {
		match (&self.origin, path.starts_with('/')) {
			(Some(origin), true) => format!("{origin}{path}"),
			_ => path.to_string(),
		}
	}
}

impl Default for HttpAssetProber {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl AssetProber for HttpAssetProber {
	async fn exists(&self, path: &str) -> bool {
		let url = self.url(path);
		match self.client.head(&url).send().await {
			Ok(response) => response.status().is_success(),
			Err(err) => {
				debug!(path, error = %err, "Asset probe failed");
				false
			}
		}
	}

	async fn metadata(&self, path: &str) -> Option<AssetMetadata> {
		let url = self.url(path);
		let response = match self.client.head(&url).send().await {
			Ok(response) if response.status().is_success() => response,
			Ok(response) => {
				debug!(path, status = response.status().as_u16(), "Asset metadata unavailable");
				return None;
			}
			Err(err) => {
				debug!(path, error = %err, "Asset metadata probe failed");
				return None;
			}
		};

		let content_type = response
			.headers()
			.get(reqwest::header::CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.map(String::from);
		let content_length = response
			.headers()
			.get(reqwest::header::CONTENT_LENGTH)
			.and_then(|value| value.to_str().ok())
			.and_then(|value| value.parse().ok());

		Some(AssetMetadata {
			content_type,
			content_length,
		})
	}
}

/// Answers existence from a known-asset manifest.
///
/// Useful when the deployment publishes an asset manifest alongside the
/// site, and for tests.
pub struct ManifestProber {
	known: HashSet<String>,
}

impl ManifestProber {
	pub fn new<I, S>(paths: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			known: paths.into_iter().map(Into::into).collect(),
		}
	}
}

#[async_trait]
impl AssetProber for ManifestProber {
	async fn exists(&self, path: &str) -> bool {
		self.known.contains(path)
	}
}

#[cfg(test)]
mod tests {
	use wiremock::matchers::{method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	use super::*;

	#[tokio::test]
	async fn test_http_probe_reports_existing_asset() {
		let server = MockServer::start().await;
		Mock::given(method("HEAD"))
			.and(path("/assets/images/en/logo.svg"))
			.respond_with(ResponseTemplate::new(200))
			.mount(&server)
			.await;

		let prober = HttpAssetProber::new().with_origin(server.uri());
		assert!(prober.exists("/assets/images/en/logo.svg").await);
		assert!(!prober.exists("/assets/images/en/missing.svg").await);
	}

	#[tokio::test]
	async fn test_http_probe_failure_reads_as_absent() {
		// No origin and a rooted path: the request itself fails.
		let prober = HttpAssetProber::new();
		assert!(!prober.exists("/assets/images/logo.svg").await);
	}

	#[tokio::test]
	async fn test_http_metadata_extracts_headers() {
		let server = MockServer::start().await;
		Mock::given(method("HEAD"))
			.respond_with(
				ResponseTemplate::new(200)
					.insert_header("content-type", "image/svg+xml")
					.set_body_bytes(vec![0u8; 512]),
			)
			.mount(&server)
			.await;

		let prober = HttpAssetProber::new().with_origin(server.uri());
		let metadata = prober.metadata("/logo.svg").await.unwrap();
		assert_eq!(metadata.content_type.as_deref(), Some("image/svg+xml"));
		assert_eq!(metadata.content_length, Some(512));
	}

	#[tokio::test]
	async fn test_manifest_probe_matches_exact_paths() {
		let prober = ManifestProber::new(["/assets/images/en/logo.svg"]);
		assert!(prober.exists("/assets/images/en/logo.svg").await);
		assert!(!prober.exists("/assets/images/logo.svg").await);
		assert_eq!(prober.metadata("/assets/images/en/logo.svg").await, None);
	}
}
