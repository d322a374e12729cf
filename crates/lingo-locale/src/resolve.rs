// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Effective-locale resolution.

use tracing::debug;

use crate::registry::LocaleRegistry;

/// Resolve the effective locale from a stored preference and detection
/// candidates.
///
/// Resolution order (highest to lowest priority):
/// 1. The stored preference, when it is a supported locale.
/// 2. The first detection candidate that is supported, tried as the full
///    tag first, then as its bare language subtag.
/// 3. `default_locale`.
///
/// # Arguments
///
/// * `registry` - The supported-locale set.
/// * `stored` - A previously persisted preference (may be absent or stale).
/// * `detected` - Environment-provided candidates in preference order, e.g.
///   an Accept-Language list. Detection itself happens outside the core.
/// * `default_locale` - The terminal answer; returned verbatim even if the
///   registry no longer lists it, so resolution always produces something.
pub fn resolve_locale(
	registry: &LocaleRegistry,
	stored: Option<&str>,
	detected: &[String],
	default_locale: &str,
) -> String {
	if let Some(preference) = stored {
		if registry.is_supported(preference) {
			debug!(locale = preference, "Resolved locale from stored preference");
			return preference.to_string();
		}
	}

	for candidate in detected {
		if registry.is_supported(candidate) {
			debug!(locale = %candidate, "Resolved locale from detection candidate");
			return candidate.clone();
		}
		let language = candidate.split('-').next().unwrap_or(candidate);
		if registry.is_supported(language) {
			debug!(
				locale = language,
				candidate = %candidate,
				"Resolved locale from detection candidate language subtag"
			);
			return language.to_string();
		}
	}

	debug!(locale = default_locale, "Resolved locale from default");
	default_locale.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::registry::DEFAULT_LOCALE;

	fn registry() -> LocaleRegistry {
		LocaleRegistry::marketing_default()
	}

	#[test]
	fn test_stored_preference_takes_priority() {
		let resolved = resolve_locale(
			&registry(),
			Some("fr-FR"),
			&["de-DE".to_string()],
			DEFAULT_LOCALE,
		);
		assert_eq!(resolved, "fr-FR");
	}

	#[test]
	fn test_unsupported_preference_is_ignored() {
		let resolved = resolve_locale(
			&registry(),
			Some("xx-YY"),
			&["de-DE".to_string()],
			DEFAULT_LOCALE,
		);
		assert_eq!(resolved, "de-DE");
	}

	#[test]
	fn test_detection_falls_back_to_language_subtag() {
		// en-IE is not served, but bare en is.
		let resolved = resolve_locale(&registry(), None, &["en-IE".to_string()], DEFAULT_LOCALE);
		assert_eq!(resolved, "en");
	}

	#[test]
	fn test_detection_order_is_respected() {
		let resolved = resolve_locale(
			&registry(),
			None,
			&["ja-JP".to_string(), "nl-NL".to_string(), "en-US".to_string()],
			DEFAULT_LOCALE,
		);
		assert_eq!(resolved, "nl-NL");
	}

	#[test]
	fn test_default_when_nothing_matches() {
		let resolved = resolve_locale(
			&registry(),
			Some(""),
			&["ja-JP".to_string(), "ko".to_string()],
			DEFAULT_LOCALE,
		);
		assert_eq!(resolved, DEFAULT_LOCALE);
	}

	#[test]
	fn test_empty_inputs_resolve_to_default() {
		let resolved = resolve_locale(&registry(), None, &[], DEFAULT_LOCALE);
		assert_eq!(resolved, DEFAULT_LOCALE);
	}
}
