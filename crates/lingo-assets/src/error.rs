// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the asset service.

use thiserror::Error;

/// Result type alias for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Errors surfaced while constructing the asset service.
///
/// Resolution itself never fails: a missing asset degrades to the terminal
/// unscoped path, and probe failures read as "absent".
#[derive(Debug, Error)]
pub enum AssetError {
	/// The asset base path is not configured.
	#[error("asset base path not configured (set {0})")]
	NotConfigured(&'static str),

	/// The service was built without an existence prober.
	#[error("an asset prober is required to build the asset service")]
	MissingProber,
}
