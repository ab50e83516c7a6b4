//! Measurement vocabulary and the canonical output schema.
//!
//! Every sensor category is mapped into the same canonical measurement
//! shape, and provider-side type names are normalized into a fixed
//! vocabulary before they are used as lookup keys anywhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical measurement types served by the weather API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementType {
    /// Air temperature in degrees Celsius.
    Temperature,
    /// Relative humidity in percent.
    Humidity,
    /// Precipitation in liters per square meter.
    Precipitation,
}

impl MeasurementType {
    /// Parse a canonical type name, as it appears in URLs.
    pub fn from_canonical(name: &str) -> Option<Self> {
        match name {
            "temperature" => Some(MeasurementType::Temperature),
            "humidity" => Some(MeasurementType::Humidity),
            "precipitation" => Some(MeasurementType::Precipitation),
            _ => None,
        }
    }

    /// Normalize a provider-side type name.
    ///
    /// Providers historically report precipitation under the name "rain";
    /// both spellings normalize to [`MeasurementType::Precipitation`].
    pub fn from_provider(name: &str) -> Option<Self> {
        match name {
            "rain" => Some(MeasurementType::Precipitation),
            other => Self::from_canonical(other),
        }
    }

    /// Canonical name used in URLs and response payloads.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            MeasurementType::Temperature => "temperature",
            MeasurementType::Humidity => "humidity",
            MeasurementType::Precipitation => "precipitation",
        }
    }

    /// Attribute name used in upstream provider payloads.
    pub fn provider_name(&self) -> &'static str {
        match self {
            MeasurementType::Precipitation => "rain",
            other => other.canonical_name(),
        }
    }

    /// Unit the canonical measurement is reported in.
    pub fn unit(&self) -> &'static str {
        match self {
            MeasurementType::Temperature => "°C",
            MeasurementType::Humidity => "%",
            MeasurementType::Precipitation => "l/m²",
        }
    }
}

/// Sensor provider conventions with a defined payload mapping.
///
/// The enum is closed on purpose: a registry entry with a category outside
/// this list fails at load time instead of producing a runtime error on
/// first request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorCategory {
    /// FIWARE NGSI v2 context broker.
    Fiware,
}

/// Geographic position of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Altitude in meters; zero when the provider omits it.
    pub altitude: f64,
}

/// A single reading with its unit and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Measured value.
    pub value: f64,
    /// Unit from the canonical unit table.
    pub unit: String,
    /// When the provider recorded the value.
    pub time: DateTime<Utc>,
}

/// The normalized shape every sensor category is mapped into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalMeasurement {
    /// Sensor id (globally unique).
    pub id: String,
    /// Provider convention the sensor speaks.
    pub category: SensorCategory,
    /// Where the sensor sits.
    pub position: Position,
    /// The reading for the requested measurement type.
    pub measurement: Reading,
    /// Canonical names of the sensor's other declared types.
    pub additional_measurements: Vec<String>,
}

/// One `(timestamp, value)` pair of a timeseries, in upstream order.
///
/// Both halves are passed through untouched; the API neither re-parses nor
/// re-sorts what the provider returned.
pub type TimeseriesPoint = (serde_json::Value, serde_json::Value);
