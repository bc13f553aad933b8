//! Push Service Adapter
//!
//! Trait and types for push-notification backends that deliver one message
//! to a batch of device tokens and report a per-token outcome.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::prelude::*;

/// Visible part of a push message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNotification {
	pub title: Box<str>,
	pub body: Box<str>,
}

/// Message dispatched to every token of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
	pub notification: PushNotification,
	/// Key/value data delivered to the client app
	pub data: BTreeMap<Box<str>, Box<str>>,
}

/// Outcome of delivering to a single token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
	Delivered { message_id: Option<Box<str>> },
	/// The push service rejected the token (e.g. `NotRegistered`)
	Failed { error: Box<str> },
}

/// Per-token result of one batch dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushDeliveryResult {
	pub token: Box<str>,
	pub status: DeliveryStatus,
}

impl PushDeliveryResult {
	pub fn delivered(token: &str, message_id: Option<&str>) -> Self {
		PushDeliveryResult {
			token: token.into(),
			status: DeliveryStatus::Delivered { message_id: message_id.map(Box::from) },
		}
	}

	pub fn failed(token: &str, error: &str) -> Self {
		PushDeliveryResult { token: token.into(), status: DeliveryStatus::Failed { error: error.into() } }
	}

	pub fn is_failure(&self) -> bool {
		matches!(self.status, DeliveryStatus::Failed { .. })
	}
}

#[async_trait]
pub trait PushAdapter: Debug + Send + Sync {
	/// Send `message` to every token in one logical call.
	///
	/// Returns exactly one result per token, in input order. An `Err` means
	/// the dispatch itself failed and nothing can be said about single tokens.
	async fn send_batch(
		&self,
		tokens: &[Box<str>],
		message: &PushMessage,
	) -> ClResult<Vec<PushDeliveryResult>>;
}

// vim: ts=4
