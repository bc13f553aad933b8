//! FCM legacy HTTP wire format
//!
//! Request: `{"registration_ids": [...], "notification": {...}, "data": {...}}`
//! Response: `{"multicast_id": .., "success": n, "failure": n, "results": [..]}`
//! where each result is either `{"message_id": ..}` or `{"error": ..}`, in the
//! order of `registration_ids`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use pushrelay_types::prelude::*;
use pushrelay_types::push_adapter::{PushDeliveryResult, PushMessage, PushNotification};

/// Most registration ids FCM accepts in a single request
pub const MAX_TOKENS_PER_REQUEST: usize = 1000;

#[derive(Debug, Serialize)]
pub struct FcmRequest<'a> {
	pub registration_ids: &'a [Box<str>],
	pub notification: &'a PushNotification,
	pub data: &'a BTreeMap<Box<str>, Box<str>>,
}

impl<'a> FcmRequest<'a> {
	pub fn new(tokens: &'a [Box<str>], message: &'a PushMessage) -> Self {
		FcmRequest { registration_ids: tokens, notification: &message.notification, data: &message.data }
	}
}

#[derive(Debug, Deserialize)]
pub struct FcmResponse {
	#[serde(default)]
	pub success: u64,
	#[serde(default)]
	pub failure: u64,
	#[serde(default)]
	pub results: Vec<FcmResult>,
}

#[derive(Debug, Deserialize)]
pub struct FcmResult {
	pub message_id: Option<String>,
	pub error: Option<String>,
}

/// Decode a response body into per-token results aligned with `tokens`.
pub fn parse_response(tokens: &[Box<str>], body: &[u8]) -> ClResult<Vec<PushDeliveryResult>> {
	let response: FcmResponse = serde_json::from_slice(body)?;

	if response.results.len() != tokens.len() {
		return Err(Error::NetworkError(format!(
			"FCM returned {} results for {} tokens",
			response.results.len(),
			tokens.len()
		)));
	}
	debug!(success = response.success, failure = response.failure, "FCM batch response");

	Ok(tokens
		.iter()
		.zip(response.results)
		.map(|(token, result)| match result.error {
			Some(error) => PushDeliveryResult::failed(token, &error),
			None => PushDeliveryResult::delivered(token, result.message_id.as_deref()),
		})
		.collect())
}

#[cfg(test)]
mod tests {
	use super::*;
	use pushrelay_types::push_adapter::DeliveryStatus;
	use serde_json::json;

	fn tokens(list: &[&str]) -> Vec<Box<str>> {
		list.iter().map(|t| Box::from(*t)).collect()
	}

	#[test]
	fn test_request_body() {
		let mut data = BTreeMap::new();
		data.insert(Box::from("senderId"), Box::from("uid-alice"));
		data.insert(Box::from("type"), Box::from("chat_message"));
		let message = PushMessage {
			notification: PushNotification { title: "Alice".into(), body: "hi".into() },
			data,
		};
		let toks = tokens(&["A", "B"]);

		let body = serde_json::to_value(FcmRequest::new(&toks, &message)).unwrap();
		assert_eq!(
			body,
			json!({
				"registration_ids": ["A", "B"],
				"notification": { "title": "Alice", "body": "hi" },
				"data": { "senderId": "uid-alice", "type": "chat_message" }
			})
		);
	}

	#[test]
	fn test_parse_positional_results() {
		let body = json!({
			"multicast_id": 216,
			"success": 2,
			"failure": 1,
			"canonical_ids": 0,
			"results": [
				{ "message_id": "1:0408" },
				{ "error": "NotRegistered" },
				{ "message_id": "1:2342" }
			]
		});
		let toks = tokens(&["A", "B", "C"]);

		let results = parse_response(&toks, body.to_string().as_bytes()).unwrap();
		assert_eq!(results.len(), 3);
		assert_eq!(results[0], PushDeliveryResult::delivered("A", Some("1:0408")));
		assert_eq!(
			results[1].status,
			DeliveryStatus::Failed { error: "NotRegistered".into() }
		);
		assert_eq!(&*results[1].token, "B");
		assert!(!results[2].is_failure());
	}

	#[test]
	fn test_parse_result_count_mismatch() {
		let body = json!({ "results": [{ "message_id": "1" }] });
		let res = parse_response(&tokens(&["A", "B"]), body.to_string().as_bytes());
		assert!(matches!(res, Err(Error::NetworkError(_))));
	}

	#[test]
	fn test_parse_garbage() {
		let res = parse_response(&tokens(&["A"]), b"<html>Unauthorized</html>");
		assert!(matches!(res, Err(Error::Parse)));
	}
}

// vim: ts=4
