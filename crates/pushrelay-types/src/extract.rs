//! Custom Axum extractors for pushrelay-specific types.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::Error;
use crate::types::CallerIdentity;

// Caller //
//********//
/// Authenticated caller, placed in request extensions by the auth middleware.
#[derive(Clone, Debug)]
pub struct Caller(pub CallerIdentity);

// OptionalCaller //
//****************//
/// Caller extractor that doesn't fail if the request is unauthenticated
#[derive(Clone, Debug)]
pub struct OptionalCaller(pub Option<CallerIdentity>);

impl<S> FromRequestParts<S> for OptionalCaller
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let caller = parts.extensions.get::<Caller>().cloned().map(|c| c.0);
		Ok(OptionalCaller(caller))
	}
}

// vim: ts=4
