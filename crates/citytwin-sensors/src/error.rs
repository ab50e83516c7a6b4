//! Error types for the sensor crate.

use thiserror::Error;

/// Errors that can occur when loading the registry or talking to sensors.
#[derive(Debug, Error)]
pub enum SensorError {
    /// I/O error reading the registry definition file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The registry definition file could not be parsed.
    #[error("registry parse error: {0}")]
    Registry(#[from] serde_yaml::Error),

    /// Two sensors in the registry share an id.
    #[error("duplicate sensor id `{0}` in registry")]
    DuplicateSensorId(String),

    /// A sensor declares a measurement type outside the known vocabulary.
    #[error("sensor `{sensor}` declares unknown measurement type `{type_name}`")]
    UnknownMeasurementType {
        /// Declaring sensor id.
        sensor: String,
        /// The unrecognized type name.
        type_name: String,
    },

    /// Outbound HTTP request failed (connect, timeout or error status).
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provider response did not have the expected shape.
    #[error("malformed payload from sensor `{sensor}`: {reason}")]
    MalformedPayload {
        /// Sensor the payload came from.
        sensor: String,
        /// What was wrong with it.
        reason: String,
    },
}
