//! Common test utilities and helpers
//!
//! In-memory document store and scripted push service that record every
//! call, so tests can assert which external calls were (not) made.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use pushrelay_notify::{NotificationRelay, RelayOpts};
use pushrelay_types::document_adapter::{DocumentAdapter, FieldUpdate, apply_field_update};
use pushrelay_types::prelude::*;
use pushrelay_types::push_adapter::{PushAdapter, PushDeliveryResult, PushMessage};

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

// MemoryDocuments //
//*****************//
#[derive(Debug, Default)]
pub struct MemoryDocuments {
	pub docs: Mutex<HashMap<String, Value>>,
	pub updates: Mutex<Vec<(String, String, Vec<(Box<str>, FieldUpdate)>)>>,
	pub fail_get: bool,
	pub fail_update: bool,
}

impl MemoryDocuments {
	pub fn with_user(receiver_id: &str, tokens: &[&str]) -> Self {
		let store = MemoryDocuments::default();
		store.docs.lock().insert(format!("users/{}", receiver_id), json!({ "fcmTokens": tokens }));
		store
	}

	pub fn doc(&self, collection: &str, doc_id: &str) -> Option<Value> {
		self.docs.lock().get(&format!("{}/{}", collection, doc_id)).cloned()
	}

	pub fn tokens(&self, receiver_id: &str) -> Vec<String> {
		self.doc("users", receiver_id)
			.and_then(|doc| doc.get("fcmTokens").cloned())
			.and_then(|tokens| serde_json::from_value(tokens).ok())
			.unwrap_or_default()
	}

	pub fn update_count(&self) -> usize {
		self.updates.lock().len()
	}
}

#[async_trait]
impl DocumentAdapter for MemoryDocuments {
	async fn get(&self, collection: &str, doc_id: &str) -> ClResult<Option<Value>> {
		if self.fail_get {
			return Err(Error::DbError);
		}
		Ok(self.doc(collection, doc_id))
	}

	async fn set(&self, collection: &str, doc_id: &str, doc: Value) -> ClResult<()> {
		self.docs.lock().insert(format!("{}/{}", collection, doc_id), doc);
		Ok(())
	}

	async fn update(
		&self,
		collection: &str,
		doc_id: &str,
		updates: &[(Box<str>, FieldUpdate)],
	) -> ClResult<()> {
		self.updates.lock().push((collection.to_string(), doc_id.to_string(), updates.to_vec()));
		if self.fail_update {
			return Err(Error::DbError);
		}

		let mut docs = self.docs.lock();
		let doc = docs.get_mut(&format!("{}/{}", collection, doc_id)).ok_or(Error::NotFound)?;
		for (field, update) in updates {
			apply_field_update(doc, field, update)?;
		}
		Ok(())
	}
}

// ScriptedPush //
//**************//
/// Push service that fails the listed tokens, or the whole dispatch
#[derive(Debug, Default)]
pub struct ScriptedPush {
	pub failing_tokens: Vec<String>,
	pub fail_dispatch: bool,
	pub calls: Mutex<Vec<(Vec<Box<str>>, PushMessage)>>,
}

impl ScriptedPush {
	pub fn failing(tokens: &[&str]) -> Self {
		ScriptedPush {
			failing_tokens: tokens.iter().map(ToString::to_string).collect(),
			..Default::default()
		}
	}

	pub fn broken() -> Self {
		ScriptedPush { fail_dispatch: true, ..Default::default() }
	}

	pub fn call_count(&self) -> usize {
		self.calls.lock().len()
	}
}

#[async_trait]
impl PushAdapter for ScriptedPush {
	async fn send_batch(
		&self,
		tokens: &[Box<str>],
		message: &PushMessage,
	) -> ClResult<Vec<PushDeliveryResult>> {
		self.calls.lock().push((tokens.to_vec(), message.clone()));
		if self.fail_dispatch {
			return Err(Error::NetworkError("connection reset".into()));
		}

		Ok(tokens
			.iter()
			.enumerate()
			.map(|(i, token)| {
				if self.failing_tokens.iter().any(|t| t.as_str() == &**token) {
					PushDeliveryResult::failed(token, "NotRegistered")
				} else {
					PushDeliveryResult::delivered(token, Some(&format!("msg-{}", i)))
				}
			})
			.collect())
	}
}

pub fn create_relay(
	documents: &Arc<MemoryDocuments>,
	push: &Arc<ScriptedPush>,
	opts: RelayOpts,
) -> NotificationRelay {
	NotificationRelay::new(documents.clone(), push.clone(), opts)
}

pub fn alice() -> CallerIdentity {
	CallerIdentity::new("uid-alice")
}

// vim: ts=4
