//! App builder - constructs and runs the relay server

use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::prelude::*;
use crate::routes;
use pushrelay_notify::{NotificationRelay, PrunePolicy, RelayOpts};
use pushrelay_types::document_adapter::DocumentAdapter;
use pushrelay_types::push_adapter::PushAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,
	pub relay: NotificationRelay,
	pub verifier: TokenVerifier,
}

pub type App = Arc<AppState>;

pub struct Adapters {
	pub document_adapter: Option<Arc<dyn DocumentAdapter>>,
	pub push_adapter: Option<Arc<dyn PushAdapter>>,
}

#[derive(Debug)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	pub auth_secret: Option<Box<str>>,
	pub relay: RelayOpts,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			opts: AppBuilderOpts {
				listen: crate::config::DEFAULT_LISTEN.into(),
				auth_secret: None,
				relay: RelayOpts::default(),
			},
			adapters: Adapters { document_adapter: None, push_adapter: None },
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn auth_secret(&mut self, auth_secret: impl Into<Box<str>>) -> &mut Self {
		self.opts.auth_secret = Some(auth_secret.into());
		self
	}
	pub fn relay_opts(&mut self, relay: RelayOpts) -> &mut Self {
		self.opts.relay = relay;
		self
	}
	pub fn prune_policy(&mut self, prune_policy: PrunePolicy) -> &mut Self {
		self.opts.relay.prune_policy = prune_policy;
		self
	}
	pub fn users_collection(&mut self, users_collection: impl Into<Box<str>>) -> &mut Self {
		self.opts.relay.users_collection = users_collection.into();
		self
	}

	// Adapters
	pub fn document_adapter(&mut self, document_adapter: Arc<dyn DocumentAdapter>) -> &mut Self {
		self.adapters.document_adapter = Some(document_adapter);
		self
	}
	pub fn push_adapter(&mut self, push_adapter: Arc<dyn PushAdapter>) -> &mut Self {
		self.adapters.push_adapter = Some(push_adapter);
		self
	}

	/// Assemble the app state. Fails if an adapter or the auth secret is missing.
	pub fn build(self) -> ClResult<App> {
		let Some(document_adapter) = self.adapters.document_adapter else {
			return Err(Error::ConfigError("document adapter not configured".into()));
		};
		let Some(push_adapter) = self.adapters.push_adapter else {
			return Err(Error::ConfigError("push adapter not configured".into()));
		};
		let Some(auth_secret) = self.opts.auth_secret.as_deref() else {
			return Err(Error::ConfigError("auth secret not configured".into()));
		};

		let verifier = TokenVerifier::new(auth_secret);
		let relay = NotificationRelay::new(document_adapter, push_adapter, self.opts.relay.clone());

		Ok(Arc::new(AppState { opts: self.opts, relay, verifier }))
	}

	/// Build the app and serve it until ctrl-c
	pub async fn run(self) -> ClResult<()> {
		let app = self.build()?;
		let router = routes::init(app.clone());

		let listener = tokio::net::TcpListener::bind(&*app.opts.listen).await?;
		info!(
			version = VERSION,
			listen = %app.opts.listen,
			users_collection = %app.opts.relay.users_collection,
			prune_policy = ?app.opts.relay.prune_policy,
			"pushrelay listening"
		);

		axum::serve(listener, router)
			.with_graceful_shutdown(async {
				if let Err(e) = tokio::signal::ctrl_c().await {
					error!(error = %e, "Failed to listen for shutdown signal");
				}
				info!("Shutting down");
			})
			.await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
