// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Localized asset resolution for Lingo.
//!
//! Assets (images, icons) live under locale-scoped paths:
//! `/assets/images/en-US/hero-banner.jpg` for a regional variant,
//! `/assets/images/en/hero-banner.jpg` for a language variant, and
//! `/assets/images/hero-banner.jpg` as the global form. [`AssetService`]
//! walks the same fallback chain the translation side uses, asks an
//! injected [`AssetProber`] which candidate actually exists, caches the
//! answer per (key, locale, region), and de-duplicates concurrent
//! resolutions of the same asset.
//!
//! Resolution never fails: when no candidate is confirmed to exist, the
//! terminal unscoped path is returned verbatim and any placeholder
//! rendering is the page's concern.

mod config;
mod error;
mod probe;
mod service;

pub use config::{AssetConfig, ASSETS_BASE_PATH_ENV};
pub use error::{AssetError, Result};
pub use probe::{AssetMetadata, AssetProber, HttpAssetProber, ManifestProber};
pub use service::{AssetService, AssetServiceBuilder, AssetVariant, CacheStats};
