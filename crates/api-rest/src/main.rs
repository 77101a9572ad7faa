//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST server
//! (with OpenAPI/Swagger UI). The workspace's main `medflow-run` binary is
//! the deployment entrypoint.

use api_rest::AppState;
use medflow_core::{
    store_backend_from_env_value, CoreConfig, PatientDirectory, StaffRegistry, WorkflowEngine,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the MedFlow REST API server.
///
/// # Environment Variables
/// - `MEDFLOW_REST_ADDR`: server address (default: "0.0.0.0:3000")
/// - `MEDFLOW_STORE`: record store backend, "memory" or "file" (default: "memory")
/// - `MEDFLOW_DATA_DIR`: data directory, required for the file backend
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the store configuration is invalid or the store cannot be opened,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MEDFLOW_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting MedFlow REST API on {}", addr);

    let store_backend = store_backend_from_env_value(std::env::var("MEDFLOW_STORE").ok())?;
    let data_dir = std::env::var("MEDFLOW_DATA_DIR").ok().map(PathBuf::from);
    let cfg = CoreConfig::new(store_backend, data_dir)?;
    let store = cfg.build_store()?;

    let state = AppState {
        engine: WorkflowEngine::new(store.clone()),
        directory: PatientDirectory::new(store),
        staff: Arc::new(StaffRegistry::new()),
    };

    let app = api_rest::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
