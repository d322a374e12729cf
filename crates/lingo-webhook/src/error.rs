// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for webhook handling.

use thiserror::Error;

/// Result type alias for webhook operations.
pub type Result<T> = std::result::Result<T, WebhookError>;

/// Errors that can occur while handling a webhook delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
	/// The signature header was missing, malformed, or did not match the
	/// body.
	#[error("invalid webhook signature")]
	InvalidSignature,

	/// The body was not a recognized update payload.
	#[error("failed to parse webhook payload: {0}")]
	Parse(#[from] serde_json::Error),

	/// Applying the update failed; the reload after eviction could not be
	/// satisfied.
	#[error("failed to apply webhook update: {0}")]
	Apply(#[from] lingo_translate::TranslateError),
}
