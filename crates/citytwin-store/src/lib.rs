//! # citytwin-store
//!
//! Document and blob store access for the CityTwin geodata API.
//!
//! This crate implements the feature query pipeline shared by all
//! id-filtered endpoints:
//!
//! - [`IdFilter`] turns the optional `ids` query parameter into a filter
//!   predicate over the field appropriate for the target collection.
//! - [`CollectionKind`] selects the document fields a feature query retains.
//! - [`geojson`] assembles matched features into a GeoJSON FeatureCollection
//!   by splicing the envelope around the serialized array.
//! - [`concat`] concatenates ordered blob byte streams into one response
//!   body for the building model endpoint.
//!
//! Two backends implement the [`DocumentStore`] and [`BlobStore`] traits:
//! [`MongoStore`] (MongoDB collections plus a GridFS bucket) for production
//! and [`MemoryStore`] for tests.

pub mod concat;
mod error;
mod filter;
pub mod geojson;
mod memory;
mod mongo;
pub mod projection;
mod store;

pub use error::StoreError;
pub use filter::{IdField, IdFilter};
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use projection::CollectionKind;
pub use store::{BlobRef, BlobStore, ByteStream, DocumentStore};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
