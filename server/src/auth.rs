//! Caller authentication
//!
//! Verifies `Authorization: Bearer <jwt>` (HS256, `sub` = caller uid) and
//! places the caller identity into request extensions. Requests without a
//! valid token pass through unauthenticated; the relay rejects them.

use axum::{
	extract::{Request, State},
	http::{HeaderMap, header},
	middleware::Next,
	response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::prelude::*;
use pushrelay_types::extract::Caller;

/// Claims carried by caller tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct CallerClaims {
	pub sub: String,
	pub exp: u64,
}

pub struct TokenVerifier {
	key: DecodingKey,
	validation: Validation,
}

impl fmt::Debug for TokenVerifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TokenVerifier").field("algorithms", &self.validation.algorithms).finish()
	}
}

impl TokenVerifier {
	pub fn new(secret: &str) -> Self {
		TokenVerifier {
			key: DecodingKey::from_secret(secret.as_bytes()),
			validation: Validation::new(Algorithm::HS256),
		}
	}

	pub fn verify(&self, token: &str) -> ClResult<CallerIdentity> {
		let data = decode::<CallerClaims>(token, &self.key, &self.validation).map_err(|e| {
			debug!(error = %e, "Caller token rejected");
			Error::Unauthenticated
		})?;

		if data.claims.sub.is_empty() {
			return Err(Error::Unauthenticated);
		}
		Ok(CallerIdentity::new(data.claims.sub))
	}
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
	headers
		.get(header::AUTHORIZATION)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.strip_prefix("Bearer "))
		.map(str::trim)
		.filter(|token| !token.is_empty())
}

/// Middleware attaching the verified caller (if any) to the request
pub async fn optional_auth(State(app): State<App>, mut req: Request, next: Next) -> Response {
	if let Some(token) = bearer_token(req.headers())
		&& let Ok(caller) = app.verifier.verify(token)
	{
		debug!(uid = %caller.uid, "Caller authenticated");
		req.extensions_mut().insert(Caller(caller));
	}

	next.run(req).await
}


// vim: ts=4
