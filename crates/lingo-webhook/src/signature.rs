// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HMAC-SHA256 webhook signatures.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

use crate::error::{Result, WebhookError};

type HmacSha256 = Hmac<Sha256>;

const PREFIX: &str = "sha256=";

/// Signs `body` with `secret`, producing the signature header value
/// `sha256=<hex>`.
pub fn sign_payload(secret: &[u8], body: &[u8]) -> String {
	let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
	mac.update(body);
	format!("{PREFIX}{}", hex::encode(mac.finalize().into_bytes()))
}

/// Verifies a `sha256=<hex>` signature header against `body`.
pub fn verify_signature(secret: &[u8], signature_header: &str, body: &[u8]) -> Result<()> {
	let Some(signature_hex) = signature_header.strip_prefix(PREFIX) else {
		warn!("Webhook signature header missing 'sha256=' prefix");
		return Err(WebhookError::InvalidSignature);
	};

	let expected = match hex::decode(signature_hex) {
		Ok(bytes) => bytes,
		Err(_) => return Err(WebhookError::InvalidSignature),
	};

	let mut mac = match HmacSha256::new_from_slice(secret) {
		Ok(mac) => mac,
		Err(_) => return Err(WebhookError::InvalidSignature),
	};
	mac.update(body);

	if mac.verify_slice(&expected).is_ok() {
		Ok(())
	} else {
		warn!("Webhook signature verification failed");
		Err(WebhookError::InvalidSignature)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SECRET: &[u8] = b"test-webhook-secret";
	const BODY: &[u8] = br#"{"type": "translation_update"}"#;

	#[test]
	fn test_sign_and_verify_round_trip() {
		let signature = sign_payload(SECRET, BODY);
		assert!(signature.starts_with("sha256="));
		assert!(verify_signature(SECRET, &signature, BODY).is_ok());
	}

	#[test]
	fn test_verify_rejects_wrong_prefix() {
		let result = verify_signature(SECRET, "sha1=abc123", BODY);
		assert!(matches!(result, Err(WebhookError::InvalidSignature)));
	}

	#[test]
	fn test_verify_rejects_invalid_hex() {
		let result = verify_signature(SECRET, "sha256=not-hex", BODY);
		assert!(matches!(result, Err(WebhookError::InvalidSignature)));
	}

	#[test]
	fn test_verify_rejects_tampered_body() {
		let signature = sign_payload(SECRET, BODY);
		let result = verify_signature(SECRET, &signature, br#"{"type": "asset_update"}"#);
		assert!(matches!(result, Err(WebhookError::InvalidSignature)));
	}

	#[test]
	fn test_verify_rejects_wrong_secret() {
		let signature = sign_payload(SECRET, BODY);
		let result = verify_signature(b"other-secret", &signature, BODY);
		assert!(matches!(result, Err(WebhookError::InvalidSignature)));
	}
}

#[cfg(test)]
mod proptests {
	use proptest::prelude::*;

	use super::*;

	proptest! {
		#[test]
		fn prop_round_trip(
			secret in proptest::collection::vec(proptest::num::u8::ANY, 1..100),
			body in proptest::collection::vec(proptest::num::u8::ANY, 0..1000)
		) {
			let signature = sign_payload(&secret, &body);
			prop_assert!(verify_signature(&secret, &signature, &body).is_ok());
		}

		#[test]
		fn prop_signature_is_prefixed_hex(
			secret in proptest::collection::vec(proptest::num::u8::ANY, 1..100),
			body in proptest::collection::vec(proptest::num::u8::ANY, 0..500)
		) {
			let signature = sign_payload(&secret, &body);
			let hex_part = signature.strip_prefix("sha256=").unwrap();
			prop_assert_eq!(hex_part.len(), 64);
			prop_assert!(hex_part.chars().all(|c| c.is_ascii_hexdigit()));
		}

		#[test]
		fn prop_wrong_secret_fails(
			secret1 in proptest::collection::vec(proptest::num::u8::ANY, 1..100),
			secret2 in proptest::collection::vec(proptest::num::u8::ANY, 1..100),
			body in proptest::collection::vec(proptest::num::u8::ANY, 1..500)
		) {
			if secret1 != secret2 {
				let signature = sign_payload(&secret1, &body);
				prop_assert!(verify_signature(&secret2, &signature, &body).is_err());
			}
		}
	}
}
