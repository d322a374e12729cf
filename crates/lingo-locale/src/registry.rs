// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Supported-locale registry and locale metadata.

use serde::{Deserialize, Serialize};

/// The designated base locale: the terminal fallback with no further
/// fallback beyond it.
pub const DEFAULT_LOCALE: &str = "en";

/// Text direction for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	Ltr,
	Rtl,
}

impl Direction {
	pub fn as_str(&self) -> &'static str {
		match self {
			Direction::Ltr => "ltr",
			Direction::Rtl => "rtl",
		}
	}
}

/// Currency metadata for a locale.
///
/// `format` is a display template over `{amount}` and `{symbol}`
/// placeholders, e.g. `"{symbol}{amount}"` for `£12.50`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyInfo {
	pub code: String,
	pub symbol: String,
	pub format: String,
}

impl CurrencyInfo {
	pub fn new(code: &str, symbol: &str, format: &str) -> Self {
		Self {
			code: code.to_string(),
			symbol: symbol.to_string(),
			format: format.to_string(),
		}
	}

	/// Renders `amount` with two decimal places through the format template.
	pub fn format_amount(&self, amount: f64) -> String {
		self.format
			.replace("{amount}", &format!("{amount:.2}"))
			.replace("{symbol}", &self.symbol)
	}
}

/// Metadata for one supported locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleInfo {
	/// The locale tag, e.g. `en-GB`. Exact spelling; used as the catalog key.
	pub code: String,
	/// English display name.
	pub name: String,
	/// Name in the locale's own language.
	pub native_name: String,
	/// Text direction.
	pub direction: Direction,
	/// Currency metadata.
	pub currency: CurrencyInfo,
	/// Marketing region label.
	pub region: String,
	/// Flag emoji for the language switcher.
	pub flag: String,
}

impl LocaleInfo {
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		code: &str,
		name: &str,
		native_name: &str,
		direction: Direction,
		currency: CurrencyInfo,
		region: &str,
		flag: &str,
	) -> Self {
		Self {
			code: code.to_string(),
			name: name.to_string(),
			native_name: native_name.to_string(),
			direction,
			currency,
			region: region.to_string(),
			flag: flag.to_string(),
		}
	}

	pub fn is_rtl(&self) -> bool {
		self.direction == Direction::Rtl
	}
}

/// The set of locales the site serves.
///
/// Lookups are by exact tag string. The registry is immutable after
/// construction; swapping the supported set means building a new service.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
	locales: Vec<LocaleInfo>,
}

impl LocaleRegistry {
	/// Builds a registry from an explicit locale set.
	pub fn new(locales: Vec<LocaleInfo>) -> Self {
		Self { locales }
	}

	/// The default marketing-site locale set.
	pub fn marketing_default() -> Self {
		let eur = || CurrencyInfo::new("EUR", "€", "{amount} {symbol}");
		let usd_suffix = || CurrencyInfo::new("USD", "$", "{amount} {symbol}");
		let usd_prefix = || CurrencyInfo::new("USD", "$", "{symbol}{amount}");

		Self::new(vec![
			LocaleInfo::new("en", "English", "English", Direction::Ltr, usd_suffix(), "Global", "🌐"),
			LocaleInfo::new("en-US", "English (US)", "English (United States)", Direction::Ltr, usd_suffix(), "United States", "🇺🇸"),
			LocaleInfo::new("es-US", "Spanish (US)", "Español (Estados Unidos)", Direction::Ltr, usd_suffix(), "United States", "🇺🇸"),
			LocaleInfo::new("en-GB", "English (UK)", "English (United Kingdom)", Direction::Ltr, CurrencyInfo::new("GBP", "£", "{symbol}{amount}"), "United Kingdom", "🇬🇧"),
			LocaleInfo::new("en-AU", "English (AU)", "English (Australia)", Direction::Ltr, CurrencyInfo::new("AUD", "A$", "{symbol}{amount}"), "Australia", "🇦🇺"),
			LocaleInfo::new("en-CA", "English (CA)", "English (Canada)", Direction::Ltr, CurrencyInfo::new("CAD", "C$", "{symbol}{amount}"), "Canada", "🇨🇦"),
			LocaleInfo::new("fr-CA", "French (CA)", "Français (Canada)", Direction::Ltr, CurrencyInfo::new("CAD", "C$", "{symbol}{amount}"), "Canada", "🇨🇦"),
			LocaleInfo::new("fr-FR", "French (FR)", "Français (France)", Direction::Ltr, eur(), "France", "🇫🇷"),
			LocaleInfo::new("fr-BE", "French (BE)", "Français (Belgique)", Direction::Ltr, eur(), "Belgium", "🇧🇪"),
			LocaleInfo::new("nl-BE", "Dutch (BE)", "Nederlands (België)", Direction::Ltr, eur(), "Belgium", "🇧🇪"),
			LocaleInfo::new("nl-NL", "Dutch (NL)", "Nederlands (Nederland)", Direction::Ltr, eur(), "Netherlands", "🇳🇱"),
			LocaleInfo::new("en-NL", "English (NL)", "English (Netherlands)", Direction::Ltr, eur(), "Netherlands", "🇳🇱"),
			LocaleInfo::new("de-DE", "German (DE)", "Deutsch (Deutschland)", Direction::Ltr, eur(), "Germany", "🇩🇪"),
			LocaleInfo::new("es-ES", "Spanish (ES)", "Español (España)", Direction::Ltr, eur(), "Spain", "🇪🇸"),
			LocaleInfo::new("es-MX", "Spanish (MX)", "Español (México)", Direction::Ltr, CurrencyInfo::new("MXN", "$", "{symbol}{amount}"), "Mexico", "🇲🇽"),
			LocaleInfo::new("en-MX", "English (MX)", "English (Mexico)", Direction::Ltr, CurrencyInfo::new("MXN", "$", "{symbol}{amount}"), "Mexico", "🇲🇽"),
			LocaleInfo::new("es-LATAM", "Spanish (LATAM)", "Español (Latinoamérica)", Direction::Ltr, usd_prefix(), "LATAM", "🌎"),
			LocaleInfo::new("it-IT", "Italian (IT)", "Italiano (Italia)", Direction::Ltr, eur(), "Italy", "🇮🇹"),
			LocaleInfo::new("pt-PT", "Portuguese (PT)", "Português (Portugal)", Direction::Ltr, eur(), "Portugal", "🇵🇹"),
			LocaleInfo::new("sv-SE", "Swedish (SE)", "Svenska (Sverige)", Direction::Ltr, CurrencyInfo::new("SEK", "kr", "{amount} {symbol}"), "Sweden", "🇸🇪"),
			LocaleInfo::new("en-NORDICS", "English (Nordics)", "English (Nordics)", Direction::Ltr, eur(), "Nordics", "🏔️"),
			LocaleInfo::new("fr-CH", "French (CH)", "Français (Suisse)", Direction::Ltr, CurrencyInfo::new("CHF", "CHF", "{amount} {symbol}"), "Switzerland", "🇨🇭"),
			LocaleInfo::new("en-ME", "English (ME)", "English (Middle East)", Direction::Ltr, usd_suffix(), "Middle East", "🏜️"),
			LocaleInfo::new("ar-ME", "Arabic (ME)", "العربية (الشرق الأوسط)", Direction::Rtl, usd_suffix(), "Middle East", "🏜️"),
		])
	}

	/// Whether `tag` is in the supported set (exact string match).
	pub fn is_supported(&self, tag: &str) -> bool {
		self.locales.iter().any(|info| info.code == tag)
	}

	/// Metadata for `tag`, if supported.
	pub fn info(&self, tag: &str) -> Option<&LocaleInfo> {
		self.locales.iter().find(|info| info.code == tag)
	}

	/// All supported locale tags, in registry order.
	pub fn available(&self) -> impl Iterator<Item = &str> {
		self.locales.iter().map(|info| info.code.as_str())
	}

	/// All distinct language subtags, in first-seen order.
	pub fn languages(&self) -> Vec<&str> {
		let mut languages: Vec<&str> = Vec::new();
		for info in &self.locales {
			let language = info.code.split('-').next().unwrap_or(&info.code);
			if !languages.contains(&language) {
				languages.push(language);
			}
		}
		languages
	}

	/// All region-qualified tags, in registry order.
	pub fn region_tags(&self) -> Vec<&str> {
		self.locales
			.iter()
			.filter(|info| info.code.contains('-'))
			.map(|info| info.code.as_str())
			.collect()
	}

	/// Whether `tag` reads right-to-left.
	///
	/// Falls back to the language subtag when the exact tag is unknown, so
	/// `ar` is RTL whenever any `ar-*` entry is.
	pub fn is_rtl(&self, tag: &str) -> bool {
		if let Some(info) = self.info(tag) {
			return info.is_rtl();
		}
		let language = tag.split('-').next().unwrap_or(tag);
		self.locales
			.iter()
			.any(|info| info.is_rtl() && info.code.split('-').next() == Some(language))
	}

	/// Formats `amount` in the currency of `tag`, if supported.
	pub fn format_currency(&self, tag: &str, amount: f64) -> Option<String> {
		self.info(tag).map(|info| info.currency.format_amount(amount))
	}

	pub fn len(&self) -> usize {
		self.locales.len()
	}

	pub fn is_empty(&self) -> bool {
		self.locales.is_empty()
	}
}
