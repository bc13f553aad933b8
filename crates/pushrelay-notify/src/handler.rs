//! Callable HTTP handler
//!
//! Wraps the relay in the callable-function envelope: the request body is
//! `{"data": {...}}`, a successful reply is `{"result": {...}}` and errors are
//! rendered by `Error`'s `IntoResponse` as `{"error": {...}}`.

use axum::{
	Json, Router,
	extract::{State, rejection::JsonRejection},
	routing::post,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::prelude::*;
use crate::relay::NotificationRelay;
use pushrelay_types::extract::OptionalCaller;

/// Callable request envelope
#[derive(Debug, Deserialize)]
pub struct CallableRequest {
	#[serde(default)]
	pub data: Value,
}

/// Callable response envelope
#[derive(Debug, Serialize)]
pub struct CallableResponse<T> {
	pub result: T,
}

/// Decode the callable payload. Anything undecodable counts as a request
/// with every field missing, so the relay reports it uniformly.
fn decode_request(body: Result<Json<CallableRequest>, JsonRejection>) -> NotificationRequest {
	match body {
		Ok(Json(CallableRequest { data })) => {
			serde_json::from_value(data).unwrap_or_else(|e| {
				debug!(error = %e, "Undecodable notification request");
				NotificationRequest::default()
			})
		}
		Err(rejection) => {
			debug!(error = %rejection, "Rejected callable body");
			NotificationRequest::default()
		}
	}
}

/// POST /sendNotification
///
/// Relays a chat notification from the authenticated caller to the receiver.
pub async fn post_send_notification(
	State(relay): State<NotificationRelay>,
	OptionalCaller(caller): OptionalCaller,
	body: Result<Json<CallableRequest>, JsonRejection>,
) -> ClResult<Json<CallableResponse<RelayResponse>>> {
	let request = decode_request(body);

	let result = relay.handle(&request, caller.as_ref()).await.inspect_err(|e| {
		info!(code = e.code(), "sendNotification rejected");
	})?;

	Ok(Json(CallableResponse { result }))
}

/// Routes served by the relay
pub fn routes(relay: NotificationRelay) -> Router {
	Router::new().route("/sendNotification", post(post_send_notification)).with_state(relay)
}

// vim: ts=4
