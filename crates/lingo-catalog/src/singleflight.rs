// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Keyed de-duplication of concurrent asynchronous operations.

use std::collections::HashMap;

use futures::future::{BoxFuture, Shared};
use tokio::sync::Mutex;

type SharedOp<T> = Shared<BoxFuture<'static, T>>;

/// An arena of in-flight operations indexed by key.
///
/// [`join_or_begin`](SingleFlight::join_or_begin) hands every concurrent
/// caller for the same key one shared operation, so the underlying work
/// runs at most once and settles to the same value for every waiter.
///
/// Settlement is explicit: the operation (or an invalidation) removes its
/// entry via [`forget`](SingleFlight::forget). An entry is never removed
/// implicitly, which lets the owner sequence removal against its caches.
pub struct SingleFlight<T: Clone> {
	in_flight: Mutex<HashMap<String, SharedOp<T>>>,
}

impl<T: Clone> Default for SingleFlight<T> {
	fn default() -> Self {
		Self {
			in_flight: Mutex::new(HashMap::new()),
		}
	}
}

impl<T: Clone + Send + Sync + 'static> SingleFlight<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Joins the in-flight operation for `key`, or registers the one built
	/// by `begin`.
	///
	/// `begin` runs synchronously under the registry lock, so registration
	/// is atomic: between two racing callers, exactly one constructs the
	/// operation and the other joins it.
	pub async fn join_or_begin<F>(&self, key: &str, begin: F) -> SharedOp<T>
	where
		F: FnOnce() -> BoxFuture<'static, T>,
	{
		use futures::FutureExt;

		let mut in_flight = self.in_flight.lock().await;
		if let Some(op) = in_flight.get(key) {
			return op.clone();
		}
		let op = begin().shared();
		in_flight.insert(key.to_string(), op.clone());
		op
	}

	/// Removes the entry for `key`. Returns whether one existed.
	pub async fn forget(&self, key: &str) -> bool {
		self.in_flight.lock().await.remove(key).is_some()
	}

	/// Removes every entry.
	pub async fn forget_all(&self) {
		self.in_flight.lock().await.clear();
	}

	/// Removes every entry whose key matches `predicate`.
	pub async fn forget_where<P>(&self, predicate: P)
	where
		P: Fn(&str) -> bool,
	{
		self.in_flight
			.lock()
			.await
			.retain(|key, _| !predicate(key));
	}

	/// Whether an operation is registered for `key`.
	pub async fn contains(&self, key: &str) -> bool {
		self.in_flight.lock().await.contains_key(key)
	}

	pub async fn len(&self) -> usize {
		self.in_flight.lock().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.in_flight.lock().await.is_empty()
	}
}
