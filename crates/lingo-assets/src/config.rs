// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Asset service configuration.

use crate::error::{AssetError, Result};

/// Environment variable naming the asset base path or CDN prefix.
pub const ASSETS_BASE_PATH_ENV: &str = "LINGO_ASSETS_BASE_PATH";

const DEFAULT_BASE_PATH: &str = "/assets/images";
const DEFAULT_FORMATS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "svg", "gif"];

/// Configuration for [`AssetService`](crate::AssetService).
#[derive(Debug, Clone)]
pub struct AssetConfig {
	/// Path or URL prefix all asset paths are built under. Stored without a
	/// trailing slash.
	pub base_path: String,
	/// File extensions the site serves.
	pub supported_formats: Vec<String>,
	/// Whether critical above-the-fold assets are preloaded at startup.
	pub preload_critical: bool,
}

impl Default for AssetConfig {
	fn default() -> Self {
		Self::new(DEFAULT_BASE_PATH)
	}
}

impl AssetConfig {
	pub fn new(base_path: impl Into<String>) -> Self {
		let mut base_path = base_path.into();
		while base_path.ends_with('/') {
			base_path.pop();
		}
		Self {
			base_path,
			supported_formats: DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect(),
			preload_critical: true,
		}
	}

	/// Builds a configuration from `LINGO_ASSETS_BASE_PATH`.
	pub fn from_env() -> Result<Self> {
		let base_path = std::env::var(ASSETS_BASE_PATH_ENV)
			.map_err(|_| AssetError::NotConfigured(ASSETS_BASE_PATH_ENV))?;
		if base_path.is_empty() {
			return Err(AssetError::NotConfigured(ASSETS_BASE_PATH_ENV));
		}
		Ok(Self::new(base_path))
	}

	/// Whether `path` ends in one of the supported extensions. Paths with
	/// no extension are accepted; the chain also carries extensionless
	/// icon keys.
	pub fn is_supported_format(&self, path: &str) -> bool {
		match path.rsplit_once('.') {
			Some((_, extension)) => self
				.supported_formats
				.iter()
				.any(|supported| supported.eq_ignore_ascii_case(extension)),
			None => true,
		}
	}
}
