//! GeoJSON FeatureCollection assembly.
//!
//! Feature payloads can be large, so the envelope is spliced around the
//! already-serialized feature array instead of deserializing and
//! re-serializing every feature: the outer array brackets are trimmed off
//! and the remainder lands between the envelope halves with a single
//! allocation.

use crate::{Result, StoreError};

const ENVELOPE_PREFIX: &str = "{\"type\":\"FeatureCollection\",\"features\":[";
const ENVELOPE_SUFFIX: &str = "]}";

/// Join pre-serialized feature objects into one JSON array literal.
pub fn join_features(features: &[String]) -> String {
    let len: usize = features.iter().map(|f| f.len() + 1).sum();
    let mut out = String::with_capacity(len + 2);
    out.push('[');
    for (i, feature) in features.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(feature);
    }
    out.push(']');
    out
}

/// Wrap a serialized JSON array of features in a FeatureCollection envelope.
///
/// The input must be a JSON array literal with matching outer brackets
/// (surrounding whitespace is tolerated). Callers are expected to have
/// rejected empty result sets before assembly; an empty array is refused
/// here as well, so a `NotFound` can never turn into an empty collection.
pub fn wrap_feature_collection(features_array: &str) -> Result<String> {
    let inner = features_array
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| {
            StoreError::MalformedFeatureArray(
                "expected a JSON array literal with matching outer brackets".to_string(),
            )
        })?;
    if inner.trim().is_empty() {
        return Err(StoreError::MalformedFeatureArray(
            "refusing to wrap an empty feature array".to_string(),
        ));
    }
    let mut out =
        String::with_capacity(ENVELOPE_PREFIX.len() + inner.len() + ENVELOPE_SUFFIX.len());
    out.push_str(ENVELOPE_PREFIX);
    out.push_str(inner);
    out.push_str(ENVELOPE_SUFFIX);
    Ok(out)
}
