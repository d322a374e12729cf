// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persisted locale preference.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

/// Key-value collaborator persisting the visitor's locale preference.
///
/// Read once at startup to seed the initial active locale; written once per
/// successful locale switch. Persistence failures are logged by the service
/// and never roll back a switch.
pub trait PreferenceStore: Send + Sync {
	/// The persisted preference, if any.
	fn load(&self) -> Option<String>;

	/// Persists `locale` as the preference.
	fn store(&self, locale: &str) -> io::Result<()>;
}

/// Stores the preference as a single-line file.
pub struct FilePreferenceStore {
	path: PathBuf,
}

impl FilePreferenceStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// The conventional per-user location, `{config_dir}/lingo/locale`.
	pub fn default_location() -> Option<Self> {
		let path = dirs::config_dir()?.join("lingo").join("locale");
		Some(Self::new(path))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl PreferenceStore for FilePreferenceStore {
	fn load(&self) -> Option<String> {
		let contents = std::fs::read_to_string(&self.path).ok()?;
		let locale = contents.trim();
		if locale.is_empty() {
			return None;
		}
		debug!(locale, path = %self.path.display(), "Loaded locale preference");
		Some(locale.to_string())
	}

	fn store(&self, locale: &str) -> io::Result<()> {
		if let Some(parent) = self.path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&self.path, locale)
	}
}

/// In-memory preference store for tests and embedders with their own
/// persistence.
#[derive(Default)]
pub struct MemoryPreferenceStore {
	slot: Mutex<Option<String>>,
}

impl MemoryPreferenceStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// A store pre-seeded with a preference.
	pub fn with_preference(locale: &str) -> Self {
		Self {
			slot: Mutex::new(Some(locale.to_string())),
		}
	}
}

impl PreferenceStore for MemoryPreferenceStore {
	fn load(&self) -> Option<String> {
		self.slot
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	fn store(&self, locale: &str) -> io::Result<()> {
		*self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(locale.to_string());
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_file_store_round_trip() {
		let dir = tempfile::tempdir().unwrap();
		let store = FilePreferenceStore::new(dir.path().join("nested").join("locale"));

		assert_eq!(store.load(), None);
		store.store("fr-CA").unwrap();
		assert_eq!(store.load(), Some("fr-CA".to_string()));

		store.store("en-GB").unwrap();
		assert_eq!(store.load(), Some("en-GB".to_string()));
	}

	#[test]
	fn test_file_store_ignores_blank_contents() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("locale");
		std::fs::write(&path, "  \n").unwrap();

		let store = FilePreferenceStore::new(&path);
		assert_eq!(store.load(), None);
	}

	#[test]
	fn test_file_store_trims_whitespace() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("locale");
		std::fs::write(&path, "en-AU\n").unwrap();

		let store = FilePreferenceStore::new(&path);
		assert_eq!(store.load(), Some("en-AU".to_string()));
	}

	#[test]
	fn test_memory_store() {
		let store = MemoryPreferenceStore::with_preference("es-MX");
		assert_eq!(store.load(), Some("es-MX".to_string()));

		store.store("en").unwrap();
		assert_eq!(store.load(), Some("en".to_string()));
	}
}
