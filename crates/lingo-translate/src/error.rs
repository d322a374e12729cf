// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the translation service.

use std::sync::Arc;

use lingo_catalog::CatalogError;
use thiserror::Error;

/// Result type alias for translation-service operations.
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Errors surfaced by the translation service.
///
/// Missing translations are not errors: lookups degrade to the literal key
/// and log a warning. The only failure that reaches `set_locale`/`init`
/// callers is a catalog load that could not be satisfied even by the base
/// locale.
#[derive(Debug, Error)]
pub enum TranslateError {
	/// The requested locale is not in the supported set. Nothing was
	/// mutated.
	#[error("unsupported locale: {0}")]
	UnsupportedLocale(String),

	/// Loading a catalog failed, including the base-locale fallback. The
	/// cause is shared with every waiter of the failed load.
	#[error("failed to load catalog for locale {locale}: {cause}")]
	Load {
		locale: String,
		cause: Arc<CatalogError>,
	},

	/// The service was built without a catalog fetcher.
	#[error("a catalog fetcher is required to build the translation service")]
	MissingFetcher,
}
