//! Startup-time sensor registry.
//!
//! Sensors are declared in a YAML definition file loaded once at startup.
//! The registry validates every entry (known category, known measurement
//! types, unique ids), normalizes provider type names into the canonical
//! vocabulary and builds the by-type index the weather endpoints look up
//! per request. It is read-only for the process lifetime.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::{MeasurementType, Result, SensorCategory, SensorError};

/// One registered sensor, as declared in the registry file.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorDescriptor {
    /// Globally unique sensor id.
    pub id: String,
    /// Provider convention the sensor speaks.
    pub category: SensorCategory,
    /// Endpoint returning the current entity state.
    pub url: String,
    /// Endpoint returning historical series.
    pub timeseries_url: String,
    /// Measurement types the sensor reports, in provider vocabulary
    /// (e.g. "rain" rather than "precipitation").
    pub type_of_measurement: Vec<String>,
}

impl SensorDescriptor {
    /// Canonical measurement types this sensor reports.
    ///
    /// Fails on a type name outside the known vocabulary, which makes a bad
    /// registry entry a startup error rather than a runtime one.
    pub fn measurement_types(&self) -> Result<Vec<MeasurementType>> {
        self.type_of_measurement
            .iter()
            .map(|name| {
                MeasurementType::from_provider(name).ok_or_else(|| {
                    SensorError::UnknownMeasurementType {
                        sensor: self.id.clone(),
                        type_name: name.clone(),
                    }
                })
            })
            .collect()
    }

    /// True if the sensor reports the given canonical type.
    pub fn reports(&self, ty: MeasurementType) -> bool {
        self.type_of_measurement
            .iter()
            .any(|name| MeasurementType::from_provider(name) == Some(ty))
    }

    /// Canonical names of the declared types minus the one just returned.
    pub fn additional_measurements(&self, except: MeasurementType) -> Vec<String> {
        self.type_of_measurement
            .iter()
            .filter_map(|name| MeasurementType::from_provider(name))
            .filter(|ty| *ty != except)
            .map(|ty| ty.canonical_name().to_string())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    sensors: Vec<SensorDescriptor>,
}

/// Read-only sensor registry, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct SensorRegistry {
    sensors: Vec<SensorDescriptor>,
    by_type: HashMap<MeasurementType, Vec<usize>>,
    by_id: HashMap<String, usize>,
}

impl SensorRegistry {
    /// Load the registry from a YAML definition file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    /// Parse a registry from YAML text.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        let file: RegistryFile = serde_yaml::from_str(raw)?;
        Self::from_sensors(file.sensors)
    }

    /// Build and validate a registry from descriptors.
    pub fn from_sensors(sensors: Vec<SensorDescriptor>) -> Result<Self> {
        let mut by_type: HashMap<MeasurementType, Vec<usize>> = HashMap::new();
        let mut by_id = HashMap::new();
        for (index, sensor) in sensors.iter().enumerate() {
            if by_id.insert(sensor.id.clone(), index).is_some() {
                return Err(SensorError::DuplicateSensorId(sensor.id.clone()));
            }
            for ty in sensor.measurement_types()? {
                by_type.entry(ty).or_default().push(index);
            }
        }
        Ok(Self { sensors, by_type, by_id })
    }

    /// Sensors registered for the given canonical type.
    pub fn sensors_for(&self, ty: MeasurementType) -> Vec<&SensorDescriptor> {
        self.by_type
            .get(&ty)
            .map(|indices| indices.iter().map(|&i| &self.sensors[i]).collect())
            .unwrap_or_default()
    }

    /// Look up one sensor by id.
    pub fn sensor(&self, id: &str) -> Option<&SensorDescriptor> {
        self.by_id.get(id).map(|&i| &self.sensors[i])
    }

    /// Number of registered sensors.
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    /// True when no sensors are registered.
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}
