// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The webhook wire schema.

use serde::{Deserialize, Serialize};

/// A content-change notification from the CMS.
///
/// The discriminant is the `type` field; unknown types fail to parse. An
/// absent `locale` widens the update to every locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdateEvent {
	/// One locale's translations changed, or all of them.
	TranslationUpdate {
		#[serde(default, skip_serializing_if = "Option::is_none")]
		locale: Option<String>,
	},

	/// A localized asset changed.
	AssetUpdate {
		#[serde(default, skip_serializing_if = "Option::is_none")]
		locale: Option<String>,
		#[serde(
			default,
			rename = "assetKey",
			skip_serializing_if = "Option::is_none"
		)]
		asset_key: Option<String>,
	},
}

impl UpdateEvent {
	/// The wire name of this event.
	pub fn event_type(&self) -> &'static str {
		match self {
			UpdateEvent::TranslationUpdate { .. } => "translation_update",
			UpdateEvent::AssetUpdate { .. } => "asset_update",
		}
	}

	/// The affected locale; `None` means all locales.
	pub fn locale(&self) -> Option<&str> {
		match self {
			UpdateEvent::TranslationUpdate { locale } => locale.as_deref(),
			UpdateEvent::AssetUpdate { locale, .. } => locale.as_deref(),
		}
	}
}
