// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale handling for Lingo.
//!
//! This crate provides the pure, I/O-free half of the localization system:
//! locale tag parsing, the supported-locale registry (names, RTL direction,
//! currency metadata), effective-locale resolution from a stored preference
//! and detection candidates, and the fallback candidate chain that both the
//! translation and asset subsystems walk when looking up a resource.
//!
//! # Locale tags
//!
//! A locale tag is a language subtag with an optional region subtag:
//! `en`, `en-US`, `es-LATAM`. A region-tagged locale always decomposes into
//! a `{language, region}` pair, and the bare language form is itself a
//! valid tag.
//!
//! # Example
//!
//! ```
//! use lingo_locale::{candidate_paths, FallbackOptions};
//!
//! let paths = candidate_paths("hero-banner", "en", Some("US"), &FallbackOptions::default(), "");
//! assert_eq!(
//!     paths,
//!     vec!["/US/hero-banner", "/en/hero-banner", "/hero-banner", "/hero-banner"],
//! );
//! ```

mod chain;
mod registry;
mod resolve;
mod tag;

pub use chain::{candidate_chain, candidate_paths, Candidate, FallbackOptions, Scope};
pub use registry::{CurrencyInfo, Direction, LocaleInfo, LocaleRegistry, DEFAULT_LOCALE};
pub use resolve::resolve_locale;
pub use tag::{LocaleError, LocaleTag};
