//! Outbound sensor telemetry client.
//!
//! One request goes out per registered sensor, all in parallel, and the
//! batch resolves once every call has settled. Each call is bounded by the
//! client timeout, so a stalled upstream sensor delays the response by at
//! most that long instead of indefinitely. A failing sensor contributes an
//! error annotation to the batch instead of aborting it.

use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::{
    fiware, CanonicalMeasurement, MeasurementType, Result, SensorCategory, SensorDescriptor,
    SensorRegistry, TimeseriesPoint,
};

/// Default number of points for a timeseries request.
pub const DEFAULT_TIMESERIES_POINTS: u32 = 200;

/// Outcome of one sensor in a fan-out batch.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SensorReading {
    /// Fetched and mapped successfully.
    Ok(CanonicalMeasurement),
    /// Fetch or mapping failed; the rest of the batch is unaffected.
    Failed {
        /// Sensor id.
        id: String,
        /// What went wrong, as reported to the client.
        error: String,
    },
}

impl SensorReading {
    /// The measurement, if this reading succeeded.
    pub fn measurement(&self) -> Option<&CanonicalMeasurement> {
        match self {
            SensorReading::Ok(m) => Some(m),
            SensorReading::Failed { .. } => None,
        }
    }
}

/// HTTP client for sensor telemetry endpoints.
#[derive(Debug, Clone)]
pub struct SensorClient {
    http: reqwest::Client,
}

impl SensorClient {
    /// Create a client with the given per-call timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Fetch every sensor registered for `requested` concurrently and map
    /// the responses into canonical measurements.
    pub async fn fetch_measurements(
        &self,
        registry: &SensorRegistry,
        requested: MeasurementType,
    ) -> Vec<SensorReading> {
        let calls = registry
            .sensors_for(requested)
            .into_iter()
            .map(|sensor| self.fetch_one(sensor, requested));
        join_all(calls).await
    }

    async fn fetch_one(
        &self,
        sensor: &SensorDescriptor,
        requested: MeasurementType,
    ) -> SensorReading {
        match self.fetch_and_normalize(sensor, requested).await {
            Ok(measurement) => SensorReading::Ok(measurement),
            Err(e) => {
                warn!(sensor = %sensor.id, error = %e, "sensor fetch failed");
                SensorReading::Failed {
                    id: sensor.id.clone(),
                    error: e.to_string(),
                }
            }
        }
    }

    async fn fetch_and_normalize(
        &self,
        sensor: &SensorDescriptor,
        requested: MeasurementType,
    ) -> Result<CanonicalMeasurement> {
        let payload = self.get_json(&sensor.url).await?;
        match sensor.category {
            SensorCategory::Fiware => fiware::normalize(sensor, requested, &payload),
        }
    }

    /// Fetch the last `n` points of a sensor's series for `requested`.
    ///
    /// `n` defaults to [`DEFAULT_TIMESERIES_POINTS`] and is clamped to at
    /// least 1. Upstream order is preserved.
    pub async fn fetch_timeseries(
        &self,
        sensor: &SensorDescriptor,
        requested: MeasurementType,
        n: Option<u32>,
    ) -> Result<Vec<TimeseriesPoint>> {
        let n = n.unwrap_or(DEFAULT_TIMESERIES_POINTS).max(1);
        let payload: Value = self
            .http
            .get(&sensor.timeseries_url)
            .query(&[
                ("lastN", n.to_string()),
                ("attrs", requested.provider_name().to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        match sensor.category {
            SensorCategory::Fiware => fiware::zip_timeseries(&sensor.id, &payload),
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        Ok(self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}
