//! Common types used throughout pushrelay.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

// CallerIdentity //
//****************//
/// Authenticated principal making a relay request.
///
/// Produced by the invocation boundary after token verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallerIdentity {
	pub uid: Box<str>,
}

impl CallerIdentity {
	pub fn new(uid: impl Into<Box<str>>) -> Self {
		CallerIdentity { uid: uid.into() }
	}
}

// NotificationRequest //
//*********************//
/// Request to notify a receiver. Fields are optional on the wire, presence
/// is decided by validation.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NotificationRequest {
	#[serde(rename = "receiverId", default)]
	pub receiver_id: Option<String>,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub message: Option<String>,
}

impl NotificationRequest {
	pub fn new(receiver_id: &str, title: &str, message: &str) -> Self {
		NotificationRequest {
			receiver_id: Some(receiver_id.to_string()),
			title: Some(title.to_string()),
			message: Some(message.to_string()),
		}
	}
}

// RelayResponse //
//***************//
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RelayResponse {
	pub success: bool,
	pub message: Option<Box<str>>,
}

impl RelayResponse {
	pub fn sent() -> Self {
		RelayResponse { success: true, message: None }
	}

	pub fn not_sent(message: &str) -> Self {
		RelayResponse { success: false, message: Some(message.into()) }
	}
}

// UserRecord //
//************//
/// Field of the user document holding device push tokens
pub const FCM_TOKENS_FIELD: &str = "fcmTokens";

/// The part of a user document the relay cares about.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserRecord {
	pub fcm_tokens: Vec<Box<str>>,
}

impl UserRecord {
	/// Extract the token list from a raw user document.
	///
	/// A missing, `null` or non-array field yields no tokens. Non-string
	/// elements are skipped.
	pub fn from_document(doc: &Value) -> Self {
		let fcm_tokens = match doc.get(FCM_TOKENS_FIELD) {
			Some(Value::Array(items)) => {
				items.iter().filter_map(Value::as_str).map(Box::from).collect()
			}
			Some(Value::Null) | None => Vec::new(),
			Some(other) => {
				tracing::warn!(value = %other, "fcmTokens is not an array, ignoring");
				Vec::new()
			}
		};
		UserRecord { fcm_tokens }
	}
}


// vim: ts=4
