//! FIWARE NGSI v2 payload mapping.
//!
//! Entity payloads arrive in the normalized NGSI v2 representation:
//!
//! ```json
//! {
//!   "id": "urn:ngsi-ld:WeatherObserved:ws1",
//!   "location": { "value": { "type": "Point", "coordinates": [7.22, 51.54, 65.0] } },
//!   "temperature": {
//!     "value": 21.4,
//!     "metadata": { "TimeInstant": { "value": "2026-08-25T09:00:00Z" } }
//!   }
//! }
//! ```
//!
//! Timeseries payloads carry parallel `index` and `values` arrays.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{
    CanonicalMeasurement, MeasurementType, Position, Reading, Result, SensorDescriptor,
    SensorError, TimeseriesPoint,
};

fn malformed(sensor: &str, reason: impl Into<String>) -> SensorError {
    SensorError::MalformedPayload {
        sensor: sensor.to_string(),
        reason: reason.into(),
    }
}

/// Map a FIWARE entity payload into the canonical measurement schema.
///
/// The attribute is looked up under the provider's name for the requested
/// type (precipitation arrives as "rain"); the unit comes from the canonical
/// unit table, never from the payload.
pub fn normalize(
    sensor: &SensorDescriptor,
    requested: MeasurementType,
    payload: &Value,
) -> Result<CanonicalMeasurement> {
    let attr_name = requested.provider_name();
    let attr = payload
        .get(attr_name)
        .ok_or_else(|| malformed(&sensor.id, format!("missing attribute `{attr_name}`")))?;

    let value = attr
        .get("value")
        .and_then(Value::as_f64)
        .ok_or_else(|| malformed(&sensor.id, format!("attribute `{attr_name}` has no numeric value")))?;

    let time = attr
        .pointer("/metadata/TimeInstant/value")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(&sensor.id, format!("attribute `{attr_name}` has no TimeInstant")))?;
    let time: DateTime<Utc> = DateTime::parse_from_rfc3339(time)
        .map_err(|e| malformed(&sensor.id, format!("unparseable TimeInstant `{time}`: {e}")))?
        .with_timezone(&Utc);

    let coordinates = payload
        .pointer("/location/value/coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed(&sensor.id, "missing location coordinates"))?;
    let lon = coordinates
        .first()
        .and_then(Value::as_f64)
        .ok_or_else(|| malformed(&sensor.id, "missing longitude"))?;
    let lat = coordinates
        .get(1)
        .and_then(Value::as_f64)
        .ok_or_else(|| malformed(&sensor.id, "missing latitude"))?;
    let altitude = coordinates.get(2).and_then(Value::as_f64).unwrap_or(0.0);

    Ok(CanonicalMeasurement {
        id: sensor.id.clone(),
        category: sensor.category,
        position: Position { lon, lat, altitude },
        measurement: Reading {
            value,
            unit: requested.unit().to_string(),
            time,
        },
        additional_measurements: sensor.additional_measurements(requested),
    })
}

/// Zip the provider's parallel `index`/`values` arrays into
/// `(timestamp, value)` pairs, preserving upstream order.
///
/// Both halves pass through untouched. If the arrays disagree in length the
/// result is truncated to the shorter one.
pub fn zip_timeseries(sensor: &str, payload: &Value) -> Result<Vec<TimeseriesPoint>> {
    let index = payload
        .get("index")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed(sensor, "missing `index` array"))?;
    let values = payload
        .get("values")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed(sensor, "missing `values` array"))?;
    Ok(index.iter().cloned().zip(values.iter().cloned()).collect())
}
