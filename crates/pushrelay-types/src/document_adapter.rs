//! Document Store Adapter
//!
//! Trait and types for pluggable document store backends holding JSON
//! documents addressed by `(collection, id)`.
//!
//! The relay only needs a narrow slice of a document database: read one
//! document, and atomically remove values from an array field. `set` exists
//! so records can be seeded by tools and tests.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::prelude::*;

/// A single field modification applied by [`DocumentAdapter::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
	/// Replace the field value
	Set(Value),
	/// Remove every array element equal to any of the given values.
	/// A missing or non-array field becomes an empty array.
	ArrayRemove(Vec<Value>),
}

impl FieldUpdate {
	/// Remove a single value from an array field
	pub fn array_remove_one(value: impl Into<Value>) -> Self {
		FieldUpdate::ArrayRemove(vec![value.into()])
	}
}

/// Apply one field update to a document in place.
///
/// Shared by adapter implementations so every backend has the same
/// array-remove semantics.
pub fn apply_field_update(doc: &mut Value, field: &str, update: &FieldUpdate) -> ClResult<()> {
	let Value::Object(obj) = doc else {
		return Err(Error::Internal(format!("document is not an object, cannot update {}", field)));
	};

	match update {
		FieldUpdate::Set(value) => {
			obj.insert(field.to_string(), value.clone());
		}
		FieldUpdate::ArrayRemove(values) => {
			let remaining = match obj.remove(field) {
				Some(Value::Array(items)) => {
					items.into_iter().filter(|item| !values.contains(item)).collect()
				}
				_ => Vec::new(),
			};
			obj.insert(field.to_string(), Value::Array(remaining));
		}
	}

	Ok(())
}

#[async_trait]
pub trait DocumentAdapter: Debug + Send + Sync {
	/// Read a document. Returns `None` if it does not exist.
	async fn get(&self, collection: &str, doc_id: &str) -> ClResult<Option<Value>>;

	/// Create or replace a document
	async fn set(&self, collection: &str, doc_id: &str, doc: Value) -> ClResult<()>;

	/// Atomically apply field updates to an existing document.
	///
	/// Fails with `Error::NotFound` if the document does not exist.
	async fn update(
		&self,
		collection: &str,
		doc_id: &str,
		updates: &[(Box<str>, FieldUpdate)],
	) -> ClResult<()>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_array_remove_all_occurrences() {
		let mut doc = json!({ "fcmTokens": ["A", "B", "A", "C"] });
		apply_field_update(&mut doc, "fcmTokens", &FieldUpdate::array_remove_one("A")).unwrap();
		assert_eq!(doc, json!({ "fcmTokens": ["B", "C"] }));
	}

	#[test]
	fn test_array_remove_multiple_values() {
		let mut doc = json!({ "fcmTokens": ["A", "B", "C"], "name": "Bob" });
		let update = FieldUpdate::ArrayRemove(vec![json!("A"), json!("C")]);
		apply_field_update(&mut doc, "fcmTokens", &update).unwrap();
		assert_eq!(doc, json!({ "fcmTokens": ["B"], "name": "Bob" }));
	}

	#[test]
	fn test_array_remove_on_missing_field() {
		let mut doc = json!({ "name": "Bob" });
		apply_field_update(&mut doc, "fcmTokens", &FieldUpdate::array_remove_one("A")).unwrap();
		assert_eq!(doc, json!({ "name": "Bob", "fcmTokens": [] }));
	}

	#[test]
	fn test_set_field() {
		let mut doc = json!({ "name": "Bob" });
		apply_field_update(&mut doc, "name", &FieldUpdate::Set(json!("Robert"))).unwrap();
		assert_eq!(doc, json!({ "name": "Robert" }));
	}

	#[test]
	fn test_update_non_object_fails() {
		let mut doc = json!(["A"]);
		let res = apply_field_update(&mut doc, "fcmTokens", &FieldUpdate::array_remove_one("A"));
		assert!(matches!(res, Err(Error::Internal(_))));
	}
}

// vim: ts=4
