//! Notification relay
//!
//! Looks up the receiver's device tokens, dispatches one push message to all
//! of them and prunes the tokens the push service reported as invalid.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::prelude::*;
use crate::settings::{PrunePolicy, RelayOpts};
use pushrelay_types::document_adapter::{DocumentAdapter, FieldUpdate};
use pushrelay_types::push_adapter::{PushAdapter, PushDeliveryResult, PushMessage, PushNotification};
use pushrelay_types::types::{FCM_TOKENS_FIELD, UserRecord};

pub const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";
pub const MESSAGE_TYPE: &str = "chat_message";
pub const NO_DEVICES_MESSAGE: &str = "No devices registered";
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
pub const SEND_FAILED_MESSAGE: &str = "Notification failed to send";

/// Relays chat notifications to a receiver's devices.
///
/// Backend handles are injected at construction and shared between
/// concurrent calls; the relay itself holds no mutable state.
#[derive(Debug, Clone)]
pub struct NotificationRelay {
	documents: Arc<dyn DocumentAdapter>,
	push: Arc<dyn PushAdapter>,
	opts: RelayOpts,
}

/// Request with every required field present and non-empty
#[derive(Debug)]
struct ValidRequest<'a> {
	receiver_id: &'a str,
	title: &'a str,
	message: &'a str,
}

fn non_empty(field: Option<&String>) -> Option<&str> {
	field.map(String::as_str).filter(|s| !s.is_empty())
}

fn validate(request: &NotificationRequest) -> ClResult<ValidRequest<'_>> {
	match (
		non_empty(request.receiver_id.as_ref()),
		non_empty(request.title.as_ref()),
		non_empty(request.message.as_ref()),
	) {
		(Some(receiver_id), Some(title), Some(message)) => {
			Ok(ValidRequest { receiver_id, title, message })
		}
		_ => Err(Error::InvalidArgument(MISSING_FIELDS_MESSAGE.into())),
	}
}

/// Build the chat message payload sent to every device of the receiver
pub fn build_message(title: &str, body: &str, sender_id: &str) -> PushMessage {
	let mut data = BTreeMap::new();
	data.insert("senderId".into(), sender_id.into());
	data.insert("click_action".into(), CLICK_ACTION.into());
	data.insert("type".into(), MESSAGE_TYPE.into());

	PushMessage { notification: PushNotification { title: title.into(), body: body.into() }, data }
}

/// Tokens whose delivery failed, in token order.
///
/// Results are matched to tokens by position.
pub fn invalid_tokens(tokens: &[Box<str>], results: &[PushDeliveryResult]) -> Vec<Box<str>> {
	if tokens.len() != results.len() {
		warn!(
			tokens = tokens.len(),
			results = results.len(),
			"Push result count does not match token count"
		);
	}

	tokens
		.iter()
		.zip(results)
		.filter(|(_, result)| result.is_failure())
		.map(|(token, _)| token.clone())
		.collect()
}

impl NotificationRelay {
	pub fn new(
		documents: Arc<dyn DocumentAdapter>,
		push: Arc<dyn PushAdapter>,
		opts: RelayOpts,
	) -> Self {
		NotificationRelay { documents, push, opts }
	}

	/// Relay a notification from `caller` to the receiver named in `request`.
	///
	/// Partial delivery failures are not errors: the call succeeds once the
	/// dispatch went through, and failed tokens are pruned per the configured
	/// [`PrunePolicy`].
	pub async fn handle(
		&self,
		request: &NotificationRequest,
		caller: Option<&CallerIdentity>,
	) -> ClResult<RelayResponse> {
		let Some(caller) = caller else {
			return Err(Error::Unauthenticated);
		};
		let request = validate(request)?;

		let tokens = self.read_tokens(request.receiver_id).await?;
		if tokens.is_empty() {
			info!(receiver_id = %request.receiver_id, "No devices registered for receiver");
			return Ok(RelayResponse::not_sent(NO_DEVICES_MESSAGE));
		}

		let message = build_message(request.title, request.message, &caller.uid);
		let results = match self.push.send_batch(&tokens, &message).await {
			Ok(results) => results,
			Err(e) => {
				error!(receiver_id = %request.receiver_id, error = %e, "Error sending notification");
				return Err(Error::Internal(SEND_FAILED_MESSAGE.into()));
			}
		};

		let invalid = invalid_tokens(&tokens, &results);
		debug!(
			receiver_id = %request.receiver_id,
			sent = tokens.len(),
			failed = invalid.len(),
			"Notification dispatched"
		);

		if let Err(e) = self.prune_tokens(request.receiver_id, &invalid).await {
			error!(receiver_id = %request.receiver_id, error = %e, "Error pruning invalid tokens");
			return Err(Error::Internal(SEND_FAILED_MESSAGE.into()));
		}

		Ok(RelayResponse::sent())
	}

	/// Read the receiver's tokens. A missing record has no tokens.
	async fn read_tokens(&self, receiver_id: &str) -> ClResult<Vec<Box<str>>> {
		let doc =
			self.documents.get(&self.opts.users_collection, receiver_id).await.inspect_err(|e| {
				error!(receiver_id = %receiver_id, error = %e, "Failed to read user record");
			})?;

		Ok(doc.map(|doc| UserRecord::from_document(&doc).fcm_tokens).unwrap_or_default())
	}

	async fn prune_tokens(&self, receiver_id: &str, invalid: &[Box<str>]) -> ClResult<()> {
		let to_remove: &[Box<str>] = match self.opts.prune_policy {
			PrunePolicy::FirstInvalid => invalid.get(..1).unwrap_or_default(),
			PrunePolicy::AllInvalid => invalid,
		};
		if to_remove.is_empty() {
			return Ok(());
		}

		info!(
			receiver_id = %receiver_id,
			removed = to_remove.len(),
			invalid = invalid.len(),
			"Removing invalid push tokens"
		);

		let values = to_remove.iter().map(|token| Value::String(token.to_string())).collect();
		self.documents
			.update(
				&self.opts.users_collection,
				receiver_id,
				&[(FCM_TOKENS_FIELD.into(), FieldUpdate::ArrayRemove(values))],
			)
			.await
	}
}


// vim: ts=4
