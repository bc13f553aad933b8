//! Firebase Cloud Messaging push adapter
//!
//! Sends one message to a batch of device tokens through the FCM legacy HTTP
//! protocol and reports a per-token outcome. Token sets above the FCM request
//! limit are split into sequential requests whose results keep token order.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod wire;

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use std::fmt;

use pushrelay_types::prelude::*;
use pushrelay_types::push_adapter::{DeliveryStatus, PushAdapter, PushDeliveryResult, PushMessage};

pub const DEFAULT_FCM_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

#[derive(Clone)]
pub struct FcmConfig {
	pub endpoint: Box<str>,
	pub server_key: Box<str>,
}

impl FcmConfig {
	pub fn new(server_key: impl Into<Box<str>>) -> Self {
		FcmConfig { endpoint: DEFAULT_FCM_ENDPOINT.into(), server_key: server_key.into() }
	}
}

impl fmt::Debug for FcmConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FcmConfig")
			.field("endpoint", &self.endpoint)
			.field("server_key", &"<redacted>")
			.finish()
	}
}

type HttpsClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// FCM client. The HTTP client is built once and shared by all dispatches.
pub struct FcmPushAdapter {
	config: FcmConfig,
	client: HttpsClient,
}

impl fmt::Debug for FcmPushAdapter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FcmPushAdapter").field("config", &self.config).finish()
	}
}

impl FcmPushAdapter {
	pub fn new(config: FcmConfig) -> Self {
		let roots = match HttpsConnectorBuilder::new().with_native_roots() {
			Ok(builder) => builder,
			Err(e) => {
				warn!(error = %e, "No native root certificates, using bundled webpki roots");
				HttpsConnectorBuilder::new().with_webpki_roots()
			}
		};
		let connector = roots.https_or_http().enable_http1().enable_http2().build();

		let client: HttpsClient = Client::builder(TokioExecutor::new()).build(connector);

		FcmPushAdapter { config, client }
	}

	/// Send one request of at most `wire::MAX_TOKENS_PER_REQUEST` tokens
	async fn send_chunk(
		&self,
		tokens: &[Box<str>],
		message: &PushMessage,
	) -> ClResult<Vec<PushDeliveryResult>> {
		let body = serde_json::to_vec(&wire::FcmRequest::new(tokens, message))?;

		let request = hyper::Request::builder()
			.method(hyper::Method::POST)
			.uri(&*self.config.endpoint)
			.header(hyper::header::CONTENT_TYPE, "application/json")
			.header(hyper::header::AUTHORIZATION, format!("key={}", self.config.server_key))
			.body(Full::new(Bytes::from(body)))
			.map_err(|e| Error::Internal(format!("Request build error: {}", e)))?;

		let response = self
			.client
			.request(request)
			.await
			.map_err(|e| Error::NetworkError(format!("FCM request failed: {}", e)))?;

		let status = response.status();
		let body = response
			.into_body()
			.collect()
			.await
			.map_err(|e| Error::NetworkError(format!("FCM response read failed: {}", e)))?
			.to_bytes();

		if !status.is_success() {
			let body_str = std::str::from_utf8(&body).unwrap_or("");
			warn!(status = %status, body = %body_str, "FCM rejected request");
			return Err(Error::NetworkError(format!("FCM HTTP {}", status)));
		}

		wire::parse_response(tokens, &body)
	}
}

#[async_trait]
impl PushAdapter for FcmPushAdapter {
	async fn send_batch(
		&self,
		tokens: &[Box<str>],
		message: &PushMessage,
	) -> ClResult<Vec<PushDeliveryResult>> {
		let mut results = Vec::with_capacity(tokens.len());

		for chunk in tokens.chunks(wire::MAX_TOKENS_PER_REQUEST) {
			let chunk_results = self.send_chunk(chunk, message).await?;
			for result in &chunk_results {
				if let DeliveryStatus::Failed { error } = &result.status {
					debug!(error = %error, "Push token rejected");
				}
			}
			results.extend(chunk_results);
		}

		Ok(results)
	}
}


// vim: ts=4
