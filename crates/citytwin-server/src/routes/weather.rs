//! Weather sensor endpoints.
//!
//! The path segment carries a canonical measurement type name; "rain" is
//! provider vocabulary and is not routable. A measurement request fans out
//! to every registered sensor of that type, and failed sensors appear as
//! error annotations inside an otherwise successful batch.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Json, Response};
use citytwin_sensors::MeasurementType;
use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Query parameters of the timeseries endpoint.
#[derive(Debug, Deserialize)]
pub struct TimeseriesQuery {
    /// Number of most-recent points to fetch.
    pub n: Option<u32>,
}

fn parse_type(name: &str) -> Result<MeasurementType> {
    MeasurementType::from_canonical(name)
        .ok_or_else(|| ApiError::not_found(format!("unknown measurement type: {name}")))
}

/// `GET /weather/:measurement` — current readings from every registered
/// sensor of the type.
pub async fn measurements(
    State(state): State<Arc<AppState>>,
    Path(measurement): Path<String>,
) -> Result<Response> {
    let ty = parse_type(&measurement)?;
    let readings = state.sensors.fetch_measurements(&state.registry, ty).await;
    if readings.is_empty() {
        return Err(ApiError::not_found(format!(
            "no sensors registered for {measurement}"
        )));
    }
    Ok(Json(readings).into_response())
}

/// `GET /weather/:measurement/timeseries/:sensor_id?n=` — the last `n`
/// points of one sensor's series.
pub async fn timeseries(
    State(state): State<Arc<AppState>>,
    Path((measurement, sensor_id)): Path<(String, String)>,
    Query(query): Query<TimeseriesQuery>,
) -> Result<Response> {
    let ty = parse_type(&measurement)?;
    let sensor = state
        .registry
        .sensor(&sensor_id)
        .ok_or_else(|| ApiError::not_found(format!("unknown sensor: {sensor_id}")))?;
    if !sensor.reports(ty) {
        return Err(ApiError::not_found(format!(
            "sensor {sensor_id} does not report {measurement}"
        )));
    }
    let points = state.sensors.fetch_timeseries(sensor, ty, query.n).await?;
    Ok(Json(points).into_response())
}
