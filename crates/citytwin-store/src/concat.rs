//! Ordered concatenation of blob byte streams.
//!
//! Matched building models are delivered as one body formed by concatenating
//! each blob's raw bytes in query-result order, with no separators; the
//! consumer knows individual model boundaries from the format itself. Blobs
//! are opened lazily, one at a time, so the bytes of blob N never interleave
//! with blob N+1.

use std::sync::Arc;

use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};

use crate::{BlobRef, BlobStore, Result, StoreError};

/// Total declared size up to which a concatenated body is fully buffered.
///
/// Below this limit a failing read still maps to a clean HTTP error; above
/// it the body streams and a mid-stream failure can only abort the response
/// after the headers are flushed.
pub const BUFFER_LIMIT: u64 = 4 * 1024 * 1024;

/// Sum of the declared blob lengths.
pub fn total_length(blobs: &[BlobRef]) -> u64 {
    blobs.iter().map(|b| b.length).sum()
}

/// Concatenate the given blobs into a single byte stream, in list order.
pub fn concat_stream(
    store: Arc<dyn BlobStore>,
    blobs: Vec<BlobRef>,
) -> BoxStream<'static, Result<Bytes>> {
    stream::iter(blobs.into_iter().map(Ok::<_, StoreError>))
        .and_then(move |blob| {
            let store = store.clone();
            async move { store.open_blob(&blob.filename).await }
        })
        .try_flatten()
        .boxed()
}

/// Buffer the whole concatenation into memory.
///
/// Used for payloads under [`BUFFER_LIMIT`], where a read failure should
/// surface as an error response instead of a broken body.
pub async fn concat_buffered(store: Arc<dyn BlobStore>, blobs: Vec<BlobRef>) -> Result<Bytes> {
    let mut out = Vec::with_capacity(total_length(&blobs) as usize);
    let mut chunks = concat_stream(store, blobs);
    while let Some(chunk) = chunks.try_next().await? {
        out.extend_from_slice(&chunk);
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IdFilter, MemoryStore};

    fn store_with_blobs() -> (Arc<MemoryStore>, Vec<BlobRef>) {
        let mut store = MemoryStore::new();
        store.insert_blob(1, "model_1.glb", &b"alpha"[..]);
        store.insert_blob(2, "model_2.glb", &b"bravo-bravo"[..]);
        store.insert_blob(3, "model_3.glb", &b"c"[..]);
        let blobs = vec![
            BlobRef { filename: "model_1.glb".to_string(), length: 5 },
            BlobRef { filename: "model_2.glb".to_string(), length: 11 },
            BlobRef { filename: "model_3.glb".to_string(), length: 1 },
        ];
        (Arc::new(store), blobs)
    }

    #[tokio::test]
    async fn test_concat_preserves_order_and_length() {
        let (store, blobs) = store_with_blobs();
        let expected_len = total_length(&blobs);
        let body = concat_buffered(store, blobs).await.unwrap();
        assert_eq!(body.len() as u64, expected_len);
        assert_eq!(&body[..], b"alphabravo-bravoc");
    }

    #[tokio::test]
    async fn test_concat_respects_list_order_not_insertion_order() {
        let (store, mut blobs) = store_with_blobs();
        blobs.reverse();
        let body = concat_buffered(store, blobs).await.unwrap();
        assert_eq!(&body[..], b"cbravo-bravoalpha");
    }

    #[tokio::test]
    async fn test_missing_blob_fails_the_stream() {
        let (store, _) = store_with_blobs();
        let blobs = vec![BlobRef { filename: "missing.glb".to_string(), length: 4 }];
        let err = concat_buffered(store, blobs).await.unwrap_err();
        assert!(matches!(err, StoreError::BlobRead { .. }));
    }

    #[tokio::test]
    async fn test_blob_refs_resolve_in_result_order() {
        let (store, _) = store_with_blobs();
        let refs = store.find_blobs(&IdFilter::Ids(vec![3, 1])).await.unwrap();
        let names: Vec<_> = refs.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, ["model_1.glb", "model_3.glb"]);
    }
}
