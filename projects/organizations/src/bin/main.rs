use std::sync::Arc;

use anyhow::Result;
use axum::serve;
use interfaces_gsoc_organizations::index::GsocClient;
use projects_organizations::{
	app::{router, AppState},
	config::{AppConfig, ConfigError},
	db::{connect_with_retry, init_schema, ConnectError, InitSchemaError},
	store::PgOrganizationStore,
};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum MainError {
	#[error("TracingInit: {source}")]
	TracingInit {
		#[source]
		source: utils_trace::TracingInitError,
	},
	#[error("LoadConfig: {source}")]
	LoadConfig {
		#[source]
		source: ConfigError,
	},
	#[error("ConnectDatabase: {source}")]
	ConnectDatabase {
		#[source]
		source: ConnectError,
	},
	#[error("InitSchema: {source}")]
	InitSchema {
		#[source]
		source: InitSchemaError,
	},
	#[error("TcpListenerBind: {source}")]
	TcpListenerBind {
		#[source]
		source: std::io::Error,
	},
	#[error("Serve: {source}")]
	Serve {
		#[source]
		source: std::io::Error,
	},
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
	dotenvy::dotenv().ok();

	utils_trace::init("info")
		.map_err(|source| MainError::TracingInit { source })?;

	run().await.inspect_err(|err| error!(error = %err, "Fatal startup error"))
}

async fn run() -> Result<(), MainError> {
	let config = AppConfig::from_env()
		.map_err(|source| MainError::LoadConfig { source })?;

	let pool = connect_with_retry(&config.database)
		.await
		.map_err(|source| MainError::ConnectDatabase { source })?;

	init_schema(&pool)
		.await
		.map_err(|source| MainError::InitSchema { source })?;

	let state = AppState::new(
		Arc::new(PgOrganizationStore::new(pool)),
		Arc::new(GsocClient::new(config.api_base_url.as_str())),
		&config.sync_years,
	);
	let app = router(state);

	let listener = tokio::net::TcpListener::bind(config.bind_addr)
		.await
		.map_err(|source| MainError::TcpListenerBind { source })?;

	info!("Server running on addr: {}", config.bind_addr);

	serve(listener, app)
		.await
		.map_err(|source| MainError::Serve { source })?;

	Ok(())
}
