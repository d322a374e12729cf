// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Webhook-driven cache invalidation for Lingo.
//!
//! The CMS pushes a signed JSON notification whenever translations or
//! assets change. This crate owns the wire schema ([`UpdateEvent`]),
//! HMAC-SHA256 signature verification, and the [`UpdateDispatcher`] that
//! verifies, parses, and routes a raw webhook body to the translation and
//! asset services.
//!
//! # Wire format
//!
//! ```json
//! { "type": "translation_update", "locale": "fr-FR" }
//! { "type": "translation_update" }
//! { "type": "asset_update", "locale": "en-GB", "assetKey": "hero-banner" }
//! ```
//!
//! An absent `locale` means every locale is affected. The signature header
//! carries `sha256=<hex>` over the raw body.

mod dispatch;
mod error;
mod payload;
mod signature;

pub use dispatch::{UpdateDispatcher, WebhookConfig, WEBHOOK_SECRET_ENV};
pub use error::{Result, WebhookError};
pub use payload::UpdateEvent;
pub use signature::{sign_payload, verify_signature};
