//! # citytwin-sensors
//!
//! Sensor registry and telemetry normalization for the CityTwin weather API.
//!
//! Weather sensors live behind heterogeneous third-party telemetry services.
//! This crate loads the startup-time [`SensorRegistry`], resolves which
//! sensors report a requested [`MeasurementType`], fans out one concurrent
//! HTTP call per sensor via the [`SensorClient`], and maps every
//! provider-specific payload into the single [`CanonicalMeasurement`]
//! schema. Provider type names are normalized into the canonical vocabulary
//! ("rain" becomes "precipitation") before they are used as lookup keys.

mod client;
mod error;
pub mod fiware;
mod registry;
mod types;

pub use client::{SensorClient, SensorReading, DEFAULT_TIMESERIES_POINTS};
pub use error::SensorError;
pub use registry::{SensorDescriptor, SensorRegistry};
pub use types::{
    CanonicalMeasurement, MeasurementType, Position, Reading, SensorCategory, TimeseriesPoint,
};

/// Result type for sensor operations.
pub type Result<T> = std::result::Result<T, SensorError>;
