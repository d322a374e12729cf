// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Routing verified webhook deliveries to the services.

use std::sync::Arc;

use lingo_assets::AssetService;
use lingo_translate::TranslationService;
use tracing::{info, warn};

use crate::error::{Result, WebhookError};
use crate::payload::UpdateEvent;
use crate::signature::verify_signature;

/// Environment variable naming the shared webhook secret.
pub const WEBHOOK_SECRET_ENV: &str = "LINGO_WEBHOOK_SECRET";

/// Webhook endpoint configuration.
#[derive(Debug, Clone, Default)]
pub struct WebhookConfig {
	/// Shared secret for signature verification. When absent, deliveries
	/// are accepted unsigned.
	pub secret: Option<String>,
}

impl WebhookConfig {
	pub fn with_secret(secret: impl Into<String>) -> Self {
		Self {
			secret: Some(secret.into()),
		}
	}

	/// Reads the secret from `LINGO_WEBHOOK_SECRET`; unset or empty means
	/// unsigned deliveries are accepted.
	pub fn from_env() -> Self {
		let secret = std::env::var(WEBHOOK_SECRET_ENV)
			.ok()
			.filter(|s| !s.is_empty());
		if secret.is_none() {
			warn!("No webhook secret configured; deliveries will not be verified");
		}
		Self { secret }
	}
}

/// Verifies, parses, and applies webhook deliveries.
///
/// Eviction always completes before any reload is started, so a reload is
/// never satisfied from data the update just invalidated.
pub struct UpdateDispatcher {
	translations: Arc<TranslationService>,
	assets: Arc<AssetService>,
	config: WebhookConfig,
}

impl UpdateDispatcher {
	pub fn new(
		translations: Arc<TranslationService>,
		assets: Arc<AssetService>,
		config: WebhookConfig,
	) -> Self {
		Self {
			translations,
			assets,
			config,
		}
	}

	/// Handles one raw delivery: verifies the signature (when a secret is
	/// configured), parses the payload, and applies it.
	///
	/// Returns the parsed event so the endpoint can acknowledge it.
	#[tracing::instrument(level = "info", skip_all)]
	pub async fn handle_delivery(
		&self,
		body: &[u8],
		signature: Option<&str>,
	) -> Result<UpdateEvent> {
		if let Some(secret) = &self.config.secret {
			let signature = signature.ok_or(WebhookError::InvalidSignature)?;
			verify_signature(secret.as_bytes(), signature, body)?;
		}

		let event: UpdateEvent = serde_json::from_slice(body)?;
		self.apply(&event).await?;
		Ok(event)
	}

	/// Applies an already-parsed update to the services.
	pub async fn apply(&self, event: &UpdateEvent) -> Result<()> {
		match event {
			UpdateEvent::TranslationUpdate {
				locale: Some(locale),
			} => {
				self.translations.invalidate_locale(locale).await?;
			}
			UpdateEvent::TranslationUpdate { locale: None } => {
				self.translations.invalidate_all().await?;
			}
			UpdateEvent::AssetUpdate { locale, asset_key } => {
				self.assets
					.invalidate(asset_key.as_deref(), locale.as_deref())
					.await;
			}
		}
		info!(
			event = event.event_type(),
			locale = event.locale().unwrap_or("all"),
			"Webhook update applied"
		);
		Ok(())
	}
}
