// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The catalog tree: nested translation data with dot-path lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One node of a catalog: either a translated string or a nested namespace.
///
/// The explicit tree shape gives lookups a typed not-found instead of
/// dynamic property probing, and makes "the path names a subtree, not a
/// string" a distinct miss case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogValue {
	Leaf(String),
	Node(BTreeMap<String, CatalogValue>),
}

/// The loaded translation data for one locale.
///
/// Deserializes directly from the catalog file format: a JSON object with
/// arbitrarily nested objects and string leaf values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
	root: BTreeMap<String, CatalogValue>,
}

impl Catalog {
	/// Parses a catalog from its JSON file form.
	pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}

	/// Looks up the string at a dot-delimited path (`menu.title`).
	///
	/// Returns `None` when any segment is missing, when an intermediate
	/// segment is a leaf, or when the full path lands on a subtree rather
	/// than a string.
	pub fn lookup(&self, path: &str) -> Option<&str> {
		if path.is_empty() {
			return None;
		}
		let mut node = &self.root;
		let mut segments = path.split('.').peekable();
		while let Some(segment) = segments.next() {
			match node.get(segment)? {
				CatalogValue::Leaf(value) => {
					return if segments.peek().is_none() {
						Some(value)
					} else {
						None
					};
				}
				CatalogValue::Node(children) => {
					if segments.peek().is_none() {
						return None;
					}
					node = children;
				}
			}
		}
		None
	}

	/// Whether a string exists at `path`.
	pub fn contains(&self, path: &str) -> bool {
		self.lookup(path).is_some()
	}

	/// Flattens the subtree under the dot-delimited `prefix` into
	/// fully-qualified dot-keys.
	///
	/// An empty prefix flattens the whole catalog. A prefix that names a
	/// leaf or nothing yields an empty map.
	pub fn namespace(&self, prefix: &str) -> BTreeMap<String, String> {
		let mut flat = BTreeMap::new();
		if prefix.is_empty() {
			flatten_into(&self.root, "", &mut flat);
			return flat;
		}

		let mut node = &self.root;
		for segment in prefix.split('.') {
			match node.get(segment) {
				Some(CatalogValue::Node(children)) => node = children,
				_ => return flat,
			}
		}
		flatten_into(node, prefix, &mut flat);
		flat
	}

	pub fn is_empty(&self) -> bool {
		self.root.is_empty()
	}
}

fn flatten_into(node: &BTreeMap<String, CatalogValue>, prefix: &str, out: &mut BTreeMap<String, String>) {
	for (key, value) in node {
		let qualified = if prefix.is_empty() {
			key.clone()
		} else {
			format!("{prefix}.{key}")
		};
		match value {
			CatalogValue::Leaf(text) => {
				out.insert(qualified, text.clone());
			}
			CatalogValue::Node(children) => flatten_into(children, &qualified, out),
		}
	}
}

/// Substitutes `{name}` placeholders in a translated string.
///
/// Placeholder names are ASCII alphanumerics and underscores. Placeholders
/// without a matching parameter are left verbatim, as is anything that
/// only looks like a placeholder.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
	if params.is_empty() {
		return template.to_string();
	}

	let mut out = String::with_capacity(template.len());
	let mut rest = template;
	while let Some(open) = rest.find('{') {
		out.push_str(&rest[..open]);
		let after = &rest[open + 1..];
		match after.find('}') {
			Some(close) => {
				let name = &after[..close];
				let is_placeholder = !name.is_empty()
					&& name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
				match params
					.iter()
					.find(|(key, _)| is_placeholder && *key == name)
				{
					Some((_, value)) => out.push_str(value),
					None => {
						out.push('{');
						out.push_str(name);
						out.push('}');
					}
				}
				rest = &after[close + 1..];
			}
			None => {
				out.push('{');
				rest = after;
			}
		}
	}
	out.push_str(rest);
	out
}
