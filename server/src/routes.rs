use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::App;
use crate::auth::optional_auth;
use pushrelay_notify::handler;

pub fn init(app: App) -> Router {
	handler::routes(app.relay.clone())
		.layer(middleware::from_fn_with_state(app, optional_auth))
		.layer(TraceLayer::new_for_http())
}

// vim: ts=4
