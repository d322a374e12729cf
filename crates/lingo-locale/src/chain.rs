// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fallback candidate chains for localized lookups.
//!
//! Both the translation and asset subsystems answer requests by walking an
//! ordered chain of lookup attempts. The chain is computed here, once, as a
//! pure function of the request; existence checking is the caller's concern.
//!
//! The ordering is fixed and not configurable:
//!
//! 1. region-specific (when a region is given)
//! 2. language-specific (unless disabled)
//! 3. custom fallback key, unscoped (when given)
//! 4. the original key, unscoped (unless disabled)
//! 5. the original key, unscoped (the guaranteed terminal candidate)
//!
//! The terminal candidate is always emitted, even when step 4 already
//! produced an identical entry, so a chain never resolves to nothing: a
//! caller that exhausts every earlier step still gets a usable path.

use serde::{Deserialize, Serialize};

/// Options controlling which fallback steps a chain includes.
///
/// The defaults enable every fallback level, matching the behavior page
/// bindings want: a missing regional resource quietly degrades all the way
/// to the unscoped base path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackOptions {
	/// Include the language-level step (step 2).
	pub fallback_to_language: bool,
	/// Include the unscoped original-key step (step 4).
	pub fallback_to_global: bool,
	/// An alternate key tried unscoped before the original key (step 3).
	pub custom_fallback: Option<String>,
}

impl Default for FallbackOptions {
	fn default() -> Self {
		Self {
			fallback_to_language: true,
			fallback_to_global: true,
			custom_fallback: None,
		}
	}
}

/// The lookup scope of a single candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
	/// Scoped to a region-qualified locale (`en-US`, or a bare region tag
	/// when the caller supplies one explicitly).
	Region(String),
	/// Scoped to a bare language (`en`).
	Language(String),
	/// Unscoped: the global/base form of the resource.
	Global,
}

/// One step of a fallback chain: a scope plus the key that applies there.
///
/// The key differs from the requested key only for the custom-fallback step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
	pub scope: Scope,
	pub key: String,
}

impl Candidate {
	/// Renders this candidate as a path under `base_path`.
	///
	/// Scoped candidates insert their scope as a path segment:
	/// `{base}/{scope}/{key}`; unscoped candidates render as `{base}/{key}`.
	pub fn path(&self, base_path: &str) -> String {
		match &self.scope {
			Scope::Region(region) => format!("{base_path}/{region}/{}", self.key),
			Scope::Language(language) => format!("{base_path}/{language}/{}", self.key),
			Scope::Global => format!("{base_path}/{}", self.key),
		}
	}
}

/// Computes the ordered candidate chain for one lookup request.
///
/// Pure and deterministic: no I/O, no validation beyond what the type
/// system enforces. Unsupported locales simply fail to match anything
/// downstream. The final element is always the unscoped original key.
pub fn candidate_chain(
	key: &str,
	locale: &str,
	region: Option<&str>,
	options: &FallbackOptions,
) -> Vec<Candidate> {
	let mut chain = Vec::with_capacity(5);

	if let Some(region) = region {
		chain.push(Candidate {
			scope: Scope::Region(region.to_string()),
			key: key.to_string(),
		});
	}

	if options.fallback_to_language {
		chain.push(Candidate {
			scope: Scope::Language(locale.to_string()),
			key: key.to_string(),
		});
	}

	if let Some(custom) = &options.custom_fallback {
		chain.push(Candidate {
			scope: Scope::Global,
			key: custom.clone(),
		});
	}

	if options.fallback_to_global {
		chain.push(Candidate {
			scope: Scope::Global,
			key: key.to_string(),
		});
	}

	// Terminal candidate: resolution never comes back empty-handed.
	chain.push(Candidate {
		scope: Scope::Global,
		key: key.to_string(),
	});

	chain
}

/// Renders the candidate chain for `key` as paths under `base_path`.
pub fn candidate_paths(
	key: &str,
	locale: &str,
	region: Option<&str>,
	options: &FallbackOptions,
	base_path: &str,
) -> Vec<String> {
	candidate_chain(key, locale, region, options)
		.iter()
		.map(|candidate| candidate.path(base_path))
		.collect()
}
