use std::sync::Arc;

use pushrelay::AppBuilder;
use pushrelay::config::Config;
use pushrelay_document_adapter_redb::DocumentAdapterRedb;
use pushrelay_push_adapter_fcm::FcmPushAdapter;
use pushrelay_types::prelude::*;

#[tokio::main]
async fn main() -> ClResult<()> {
	let mut builder = AppBuilder::new();
	let config = Config::from_env().inspect_err(|e| error!(error = %e, "Invalid configuration"))?;

	let document_adapter = Arc::new(DocumentAdapterRedb::new(&config.db_dir).await?);
	let push_adapter = Arc::new(FcmPushAdapter::new(config.fcm));

	builder
		.listen(config.listen)
		.auth_secret(config.auth_secret)
		.relay_opts(config.relay)
		.document_adapter(document_adapter)
		.push_adapter(push_adapter);

	builder.run().await
}

// vim: ts=4
