//! In-memory store backend.
//!
//! Holds collections and blobs in plain maps and vectors. Used by the test
//! suites so the query pipeline can be exercised without a database; result
//! order is insertion order.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use serde_json::Value;

use crate::projection::project_value;
use crate::{
    BlobRef, BlobStore, ByteStream, CollectionKind, DocumentStore, IdField, IdFilter, Result,
    StoreError,
};

#[derive(Debug, Clone)]
struct MemoryBlob {
    id: i64,
    filename: String,
    data: Bytes,
}

/// In-memory document and blob store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: HashMap<String, Vec<Value>>,
    blobs: Vec<MemoryBlob>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document to a collection, creating the collection on first use.
    pub fn insert_document(&mut self, collection: &str, doc: Value) {
        self.collections.entry(collection.to_string()).or_default().push(doc);
    }

    /// Register a blob under the given metadata id and filename.
    pub fn insert_blob(&mut self, id: i64, filename: &str, data: impl Into<Bytes>) {
        self.blobs.push(MemoryBlob {
            id,
            filename: filename.to_string(),
            data: data.into(),
        });
    }

    fn documents(&self, collection: &str) -> &[Value] {
        self.collections.get(collection).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Integer id of a document at the given dotted path.
fn id_at(doc: &Value, field: IdField) -> Option<i64> {
    let mut value = doc;
    for segment in field.path().split('.') {
        value = value.get(segment)?;
    }
    value.as_i64()
}

fn without_internal_id(doc: &Value) -> Value {
    let mut doc = doc.clone();
    if let Some(obj) = doc.as_object_mut() {
        obj.remove("_id");
    }
    doc
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_features(
        &self,
        collection: &str,
        filter: &IdFilter,
        kind: CollectionKind,
    ) -> Result<Vec<String>> {
        let fields = kind.fields();
        self.documents(collection)
            .iter()
            .filter(|doc| id_at(doc, IdField::Properties).is_some_and(|id| filter.matches(id)))
            .map(|doc| Ok(serde_json::to_string(&project_value(doc, &fields))?))
            .collect()
    }

    async fn find_documents(&self, collection: &str, filter: &IdFilter) -> Result<Vec<Value>> {
        Ok(self
            .documents(collection)
            .iter()
            .filter(|doc| id_at(doc, IdField::TopLevel).is_some_and(|id| filter.matches(id)))
            .map(without_internal_id)
            .collect())
    }

    async fn find_one(&self, collection: &str) -> Result<Option<Value>> {
        Ok(self.documents(collection).first().map(without_internal_id))
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn find_blobs(&self, filter: &IdFilter) -> Result<Vec<BlobRef>> {
        Ok(self
            .blobs
            .iter()
            .filter(|blob| filter.matches(blob.id))
            .map(|blob| BlobRef {
                filename: blob.filename.clone(),
                length: blob.data.len() as u64,
            })
            .collect())
    }

    async fn open_blob(&self, filename: &str) -> Result<ByteStream> {
        let blob = self
            .blobs
            .iter()
            .find(|blob| blob.filename == filename)
            .ok_or_else(|| StoreError::BlobRead {
                filename: filename.to_string(),
                reason: "no such blob".to_string(),
            })?;
        let data = blob.data.clone();
        Ok(stream::once(async move { Ok(data) }).boxed())
    }
}
