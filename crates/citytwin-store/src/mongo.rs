//! MongoDB-backed store.
//!
//! The digital twin data lives in one database: feature and attribute
//! collections as plain documents, building model payloads in a GridFS
//! bucket addressed by `metadata.id`. The connection handle is created once
//! at startup and shared read-only across request handlers.

use async_trait::async_trait;
use bytes::Bytes;
use futures::io::AsyncReadExt;
use futures::stream::StreamExt;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::GridFsBucketOptions;
use mongodb::{Client, Database};
use serde_json::Value;

use crate::{
    BlobRef, BlobStore, ByteStream, CollectionKind, DocumentStore, IdField, IdFilter, Result,
    StoreError,
};

/// GridFS bucket holding the building model payloads.
const MODEL_BUCKET: &str = "buildings";

/// Chunk size used when relaying blob bytes.
const READ_CHUNK: usize = 64 * 1024;

/// Handle to the digital twin database.
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect and ping the server, failing fast when it is unreachable.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        client.database("admin").run_command(doc! { "ping": 1 }).await?;
        Ok(Self {
            db: client.database(db_name),
        })
    }

    fn id_query(filter: &IdFilter, field: IdField) -> Document {
        match filter {
            IdFilter::All => doc! {},
            IdFilter::Ids(ids) => doc! { field.path(): { "$in": ids.clone() } },
        }
    }

    fn projection_doc(kind: CollectionKind) -> Document {
        let mut projection = doc! { "_id": 0 };
        for field in kind.fields() {
            projection.insert(field, 1);
        }
        projection
    }

    fn bucket(&self) -> mongodb::gridfs::GridFsBucket {
        let options = GridFsBucketOptions::builder()
            .bucket_name(MODEL_BUCKET.to_string())
            .build();
        self.db.gridfs_bucket(options)
    }
}

/// Serialize a stored document as plain JSON.
fn to_json(doc: Document) -> Value {
    Bson::Document(doc).into_relaxed_extjson()
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_features(
        &self,
        collection: &str,
        filter: &IdFilter,
        kind: CollectionKind,
    ) -> Result<Vec<String>> {
        let mut cursor = self
            .db
            .collection::<Document>(collection)
            .find(Self::id_query(filter, IdField::Properties))
            .projection(Self::projection_doc(kind))
            .await?;
        let mut features = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            features.push(serde_json::to_string(&to_json(doc))?);
        }
        Ok(features)
    }

    async fn find_documents(&self, collection: &str, filter: &IdFilter) -> Result<Vec<Value>> {
        let mut cursor = self
            .db
            .collection::<Document>(collection)
            .find(Self::id_query(filter, IdField::TopLevel))
            .projection(doc! { "_id": 0 })
            .await?;
        let mut documents = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            documents.push(to_json(doc));
        }
        Ok(documents)
    }

    async fn find_one(&self, collection: &str) -> Result<Option<Value>> {
        let doc = self
            .db
            .collection::<Document>(collection)
            .find_one(doc! {})
            .projection(doc! { "_id": 0 })
            .await?;
        Ok(doc.map(to_json))
    }
}

#[async_trait]
impl BlobStore for MongoStore {
    async fn find_blobs(&self, filter: &IdFilter) -> Result<Vec<BlobRef>> {
        let mut cursor = self
            .bucket()
            .find(Self::id_query(filter, IdField::Metadata))
            .await?;
        let mut blobs = Vec::new();
        while let Some(file) = cursor.try_next().await? {
            let filename = file.filename.ok_or_else(|| StoreError::BlobRead {
                filename: String::new(),
                reason: "stored blob has no filename".to_string(),
            })?;
            blobs.push(BlobRef {
                filename,
                length: file.length,
            });
        }
        Ok(blobs)
    }

    async fn open_blob(&self, filename: &str) -> Result<ByteStream> {
        let stream = self
            .bucket()
            .open_download_stream_by_name(filename)
            .await
            .map_err(|e| StoreError::BlobRead {
                filename: filename.to_string(),
                reason: e.to_string(),
            })?;
        let filename = filename.to_string();
        // Relay the GridFS download stream chunkwise; a failed read aborts
        // the stream with the blob named in the error.
        let chunks = futures::stream::try_unfold(
            (stream, filename),
            |(mut stream, filename)| async move {
                let mut buf = vec![0u8; READ_CHUNK];
                let n = stream.read(&mut buf).await.map_err(|e| StoreError::BlobRead {
                    filename: filename.clone(),
                    reason: e.to_string(),
                })?;
                if n == 0 {
                    Ok(None)
                } else {
                    buf.truncate(n);
                    Ok(Some((Bytes::from(buf), (stream, filename))))
                }
            },
        );
        Ok(chunks.boxed())
    }
}
