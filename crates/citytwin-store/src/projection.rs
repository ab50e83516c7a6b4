//! Field projection per collection kind.
//!
//! Feature queries do not return whole documents: every collection keeps its
//! geometry, id and color attribute, and the shaft- and pipe-like sewer
//! collections additionally keep their elevation and diameter fields. The
//! database-internal `_id` never survives projection.

use serde_json::{Map, Value};

/// Property fields every projected feature keeps.
const BASE_FIELDS: &[&str] = &["type", "geometry", "properties.id", "properties.color"];

/// Extra fields kept for shaft-like collections.
const SHAFT_FIELDS: &[&str] = &["properties.top", "properties.bottom"];

/// Extra fields kept for pipe-like collections.
const PIPE_FIELDS: &[&str] = &["properties.diameter"];

/// Semantic kind of a feature collection, deciding which fields survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    /// Sewer shafts: top and bottom elevation in addition to the basics.
    Shaft,
    /// Sewer pipes: pipe diameter in addition to the basics.
    Pipe,
    /// Anything else: geometry, id and color only.
    Generic,
}

impl CollectionKind {
    /// Dotted paths of the fields to retain. `_id` is never included.
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = BASE_FIELDS.to_vec();
        match self {
            CollectionKind::Shaft => fields.extend_from_slice(SHAFT_FIELDS),
            CollectionKind::Pipe => fields.extend_from_slice(PIPE_FIELDS),
            CollectionKind::Generic => {}
        }
        fields
    }
}

/// Project a JSON document down to the given dotted field paths.
///
/// Fields absent from the document are skipped. Used by the in-memory store;
/// the MongoDB store pushes the same projection into the query instead.
pub fn project_value(doc: &Value, fields: &[&str]) -> Value {
    let mut out = Map::new();
    for path in fields {
        let mut src = doc;
        let mut found = true;
        for segment in path.split('.') {
            match src.get(segment) {
                Some(value) => src = value,
                None => {
                    found = false;
                    break;
                }
            }
        }
        if found {
            insert_path(&mut out, path, src.clone());
        }
    }
    Value::Object(out)
}

fn insert_path(obj: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            obj.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = obj
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(map) = entry {
                insert_path(map, rest, value);
            }
        }
    }
}
