//! Store traits shared by the MongoDB and in-memory backends.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use serde_json::Value;

use crate::{CollectionKind, IdFilter, Result};

/// Byte stream over one blob's contents.
pub type ByteStream = BoxStream<'static, Result<Bytes>>;

/// Reference to a stored binary blob, resolved from a metadata query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRef {
    /// Name the blob is stored under.
    pub filename: String,
    /// Declared length in bytes.
    pub length: u64,
}

/// Read access to feature, attribute and metadata collections.
///
/// All reference data is loaded out of band and never mutated by the API, so
/// the trait is read-only by design.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Query a feature collection, returning each matched document serialized
    /// as a JSON object, in result order, projected down to the fields of
    /// `kind`. The filter applies to the `properties.id` field.
    async fn find_features(
        &self,
        collection: &str,
        filter: &IdFilter,
        kind: CollectionKind,
    ) -> Result<Vec<String>>;

    /// Query a non-feature collection, returning whole documents (minus the
    /// database-internal id) in result order. The filter applies to the
    /// top-level `id` field.
    async fn find_documents(&self, collection: &str, filter: &IdFilter) -> Result<Vec<Value>>;

    /// Fetch the single document of a metadata collection, if present.
    async fn find_one(&self, collection: &str) -> Result<Option<Value>>;
}

/// Read access to the blob store holding 3D model payloads.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Resolve blob references whose `metadata.id` matches the filter, in
    /// query-result order.
    async fn find_blobs(&self, filter: &IdFilter) -> Result<Vec<BlobRef>>;

    /// Open a byte stream over one blob's contents.
    async fn open_blob(&self, filename: &str) -> Result<ByteStream>;
}
