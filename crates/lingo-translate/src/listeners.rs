// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale-change listeners.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::error;

type LocaleListener = Box<dyn Fn(&str) + Send + Sync>;

/// Handle for a registered locale-change listener.
///
/// Returned by [`ListenerSet::subscribe`]; pass it back to
/// [`ListenerSet::unsubscribe`] to stop receiving notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscription {
	id: u64,
}

/// A set of locale-change listeners keyed by subscription handle.
///
/// Notification iterates a snapshot of the set, so a listener that
/// subscribes or unsubscribes during notification never corrupts the
/// iteration; a panicking listener is isolated and logged, and the rest
/// are still notified. No ordering between listeners is guaranteed.
#[derive(Default)]
pub struct ListenerSet {
	next_id: AtomicU64,
	listeners: Mutex<HashMap<u64, Arc<LocaleListener>>>,
}

impl ListenerSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `listener` and returns its subscription handle.
	pub fn subscribe<F>(&self, listener: F) -> Subscription
	where
		F: Fn(&str) + Send + Sync + 'static,
	{
		let id = self.next_id.fetch_add(1, Ordering::SeqCst);
		self.lock().insert(id, Arc::new(Box::new(listener)));
		Subscription { id }
	}

	/// Removes the listener behind `subscription`. Returns whether it was
	/// still registered.
	pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
		self.lock().remove(&subscription.id).is_some()
	}

	/// Notifies every currently registered listener of a locale change.
	pub fn notify(&self, locale: &str) {
		let snapshot: Vec<Arc<LocaleListener>> = self.lock().values().cloned().collect();
		for listener in snapshot {
			if catch_unwind(AssertUnwindSafe(|| listener(locale))).is_err() {
				error!(locale, "Locale-change listener panicked");
			}
		}
	}

	/// Removes every listener.
	pub fn clear(&self) {
		self.lock().clear();
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u64, Arc<LocaleListener>>> {
		self.listeners
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
	}
}
