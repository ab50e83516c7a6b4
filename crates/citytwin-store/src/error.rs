//! Error types for the store crate.

use thiserror::Error;

/// Errors that can occur when querying the document or blob store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database driver error.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A blob referenced by a query result could not be opened or read.
    #[error("failed to read blob `{filename}`: {reason}")]
    BlobRead {
        /// Name the blob is stored under.
        filename: String,
        /// Reason for failure.
        reason: String,
    },

    /// A serialized feature array did not have the expected shape.
    #[error("malformed feature array: {0}")]
    MalformedFeatureArray(String),

    /// A document could not be serialized to JSON.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
