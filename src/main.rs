//! MedFlow deployment entrypoint.
//!
//! Resolves runtime configuration from the environment, builds the record
//! store behind the workflow engine and patient directory, and serves the
//! REST API.

use api_rest::AppState;
use medflow_core::{
    store_backend_from_env_value, CoreConfig, PatientDirectory, StaffRegistry, WorkflowEngine,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the MedFlow application.
///
/// # Environment Variables
/// - `MEDFLOW_ADDR`: server address (default: "0.0.0.0:3000")
/// - `MEDFLOW_STORE`: record store backend, "memory" or "file" (default: "memory")
/// - `MEDFLOW_DATA_DIR`: data directory, required for the file backend
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medflow_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MEDFLOW_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let store_backend = store_backend_from_env_value(std::env::var("MEDFLOW_STORE").ok())?;
    let data_dir = std::env::var("MEDFLOW_DATA_DIR").ok().map(PathBuf::from);
    let cfg = CoreConfig::new(store_backend, data_dir)?;

    tracing::info!("++ Starting MedFlow on {} ({:?} store)", addr, cfg.store_backend());

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
