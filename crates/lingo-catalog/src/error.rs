// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for catalog loading.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while fetching or parsing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
	/// The catalog endpoint is not configured.
	#[error("catalog endpoint not configured (set {0})")]
	NotConfigured(&'static str),

	/// The HTTP request itself failed (network, timeout, redirect loop).
	#[error("catalog request for locale {locale} failed: {source}")]
	Request {
		locale: String,
		#[source]
		source: reqwest::Error,
	},

	/// The endpoint answered with a non-success status.
	#[error("catalog endpoint returned status {status} for locale {locale}")]
	Status { locale: String, status: u16 },

	/// The response body was not a valid catalog document.
	#[error("failed to parse catalog for locale {locale}: {source}")]
	Parse {
		locale: String,
		#[source]
		source: serde_json::Error,
	},
}
