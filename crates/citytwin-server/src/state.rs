//! Shared application state.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use citytwin_sensors::{SensorClient, SensorRegistry};
use citytwin_store::{BlobStore, DocumentStore, MongoStore};

use crate::config::ServerConfig;
use crate::error::Result;

/// State shared across all request handlers, constructed once at startup
/// and injected via axum's `State` extractor.
///
/// Everything in here is read-only after construction (the store handles
/// are connection handles, the registry never mutates), so concurrent
/// readers need no locking.
pub struct AppState {
    /// Feature, attribute and metadata collections.
    pub documents: Arc<dyn DocumentStore>,
    /// Building model blob store.
    pub blobs: Arc<dyn BlobStore>,
    /// Sensor registry loaded from the definition file.
    pub registry: SensorRegistry,
    /// Outbound telemetry client.
    pub sensors: SensorClient,
    /// Root of the static tile trees.
    pub data_dir: PathBuf,
}

impl AppState {
    /// Connect the database, load the sensor registry and assemble the state.
    pub async fn from_config(config: &ServerConfig) -> Result<Arc<Self>> {
        let store = MongoStore::connect(&config.mongodb_uri, &config.db_name).await?;
        let registry = SensorRegistry::load(&config.sensor_registry)?;
        let sensors = SensorClient::new(Duration::from_secs(config.sensor_timeout_secs))?;
        tracing::info!(
            db = %config.db_name,
            sensors = registry.len(),
            "application state initialized"
        );
        Ok(Arc::new(Self {
            documents: Arc::new(store.clone()),
            blobs: Arc::new(store),
            registry,
            sensors,
            data_dir: config.data_dir.clone(),
        }))
    }

    /// Assemble state from explicit parts. Used by tests to swap in the
    /// in-memory store and mocked sensor endpoints.
    pub fn with_parts(
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        registry: SensorRegistry,
        sensors: SensorClient,
        data_dir: PathBuf,
    ) -> Arc<Self> {
        Arc::new(Self {
            documents,
            blobs,
            registry,
            sensors,
            data_dir,
        })
    }
}
