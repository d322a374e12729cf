// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale tag parsing and decomposition.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing locale tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
	/// The tag was empty or had an empty language/region subtag.
	#[error("invalid locale tag: {0:?}")]
	InvalidTag(String),
}

/// A language tag with an optional region subtag (`en`, `en-US`, `es-LATAM`).
///
/// Tags are stored exactly as supplied; no case folding or normalization is
/// applied. Catalogs and caches are keyed by the rendered string form, so
/// callers must use one consistent spelling per locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleTag {
	language: String,
	region: Option<String>,
}

impl LocaleTag {
	/// Parses a tag of the form `language` or `language-region`.
	///
	/// The language subtag is everything before the first `-`; the region
	/// subtag is everything after it (so `es-LATAM` and `en-NORDICS` are
	/// valid). Empty subtags are rejected; nothing else is validated.
	pub fn parse(tag: &str) -> Result<Self, LocaleError> {
		match tag.split_once('-') {
			None => {
				if tag.is_empty() {
					return Err(LocaleError::InvalidTag(tag.to_string()));
				}
				Ok(Self {
					language: tag.to_string(),
					region: None,
				})
			}
			Some((language, region)) => {
				if language.is_empty() || region.is_empty() {
					return Err(LocaleError::InvalidTag(tag.to_string()));
				}
				Ok(Self {
					language: language.to_string(),
					region: Some(region.to_string()),
				})
			}
		}
	}

	/// The language subtag (`en` for `en-US`).
	pub fn language(&self) -> &str {
		&self.language
	}

	/// The region subtag, if present (`US` for `en-US`).
	pub fn region(&self) -> Option<&str> {
		self.region.as_deref()
	}

	/// Whether this tag carries a region subtag.
	pub fn has_region(&self) -> bool {
		self.region.is_some()
	}

	/// The bare language form of this tag (`en-US` becomes `en`).
	pub fn language_tag(&self) -> LocaleTag {
		LocaleTag {
			language: self.language.clone(),
			region: None,
		}
	}
}

impl fmt::Display for LocaleTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.region {
			Some(region) => write!(f, "{}-{}", self.language, region),
			None => f.write_str(&self.language),
		}
	}
}

impl FromStr for LocaleTag {
	type Err = LocaleError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl TryFrom<String> for LocaleTag {
	type Error = LocaleError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value)
	}
}

impl From<LocaleTag> for String {
	fn from(tag: LocaleTag) -> Self {
		tag.to_string()
	}
}
