//! Error type shared by the relay, the adapters and the server.
//!
//! Callers only ever see three codes (`unauthenticated`, `invalid-argument`,
//! `internal`). Every other variant is an internal condition that is logged
//! and reported to the caller as `internal`.

use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	// caller-facing
	Unauthenticated,
	InvalidArgument(String),
	Internal(String),

	// internal conditions
	NotFound,
	DbError,
	NetworkError(String),
	Parse,
	ConfigError(String),

	// externals
	Io(std::io::Error),
}

impl Error {
	/// Callable protocol status name (`UNAUTHENTICATED`, ...)
	pub fn status(&self) -> &'static str {
		match self {
			Error::Unauthenticated => "UNAUTHENTICATED",
			Error::InvalidArgument(_) => "INVALID_ARGUMENT",
			_ => "INTERNAL",
		}
	}

	/// Lowercase error code as reported to callers (`unauthenticated`, ...)
	pub fn code(&self) -> &'static str {
		match self {
			Error::Unauthenticated => "unauthenticated",
			Error::InvalidArgument(_) => "invalid-argument",
			_ => "internal",
		}
	}

	pub fn http_status(&self) -> StatusCode {
		match self {
			Error::Unauthenticated => StatusCode::UNAUTHORIZED,
			Error::InvalidArgument(_) => StatusCode::BAD_REQUEST,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Message safe to show to the caller. Internal details stay in the logs.
	pub fn public_message(&self) -> &str {
		match self {
			Error::Unauthenticated => "Authentication required",
			Error::InvalidArgument(msg) | Error::Internal(msg) => msg,
			_ => "Internal error",
		}
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::Unauthenticated => write!(f, "unauthenticated"),
			Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::NotFound => write!(f, "not found"),
			Error::DbError => write!(f, "database error"),
			Error::NetworkError(msg) => write!(f, "network error: {}", msg),
			Error::Parse => write!(f, "parse error"),
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		tracing::warn!("serde_json error: {}", err);
		Self::Parse
	}
}

impl From<tokio::task::JoinError> for Error {
	fn from(err: tokio::task::JoinError) -> Self {
		Self::Internal(format!("task join error: {}", err))
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let body = serde_json::json!({
			"error": {
				"status": self.status(),
				"code": self.code(),
				"message": self.public_message(),
			}
		});
		(self.http_status(), Json(body)).into_response()
	}
}


// vim: ts=4
