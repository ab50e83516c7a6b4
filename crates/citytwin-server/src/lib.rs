//! # citytwin-server
//!
//! HTTP API server for the CityTwin geodata backend: building models and
//! attributes out of the document/blob store, static terrain and point-cloud
//! tile trees, sewer network GeoJSON, and normalized weather sensor
//! readings.

pub mod config;
mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{ApiError, Result};
pub use routes::build_router;
pub use state::AppState;

/// Run the server until the listener fails.
pub async fn run(config: ServerConfig) -> Result<()> {
    let state = AppState::from_config(&config).await?;
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
