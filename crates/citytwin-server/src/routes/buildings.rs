//! Building model and attribute endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use citytwin_store::concat::{self, BUFFER_LIMIT};
use citytwin_store::IdFilter;

use crate::error::{ApiError, Result};
use crate::routes::IdQuery;
use crate::state::AppState;

const TILE_INFO_COLLECTION: &str = "buildings.tileInfo";
const ATTRIBUTES_COLLECTION: &str = "buildings.attributes";

/// `GET /buildings?ids=` — concatenated binary model stream.
///
/// The body is the raw bytes of every matched model in query-result order
/// with no separators; the glTF framing delimits individual models. The
/// `application/json` label is what upstream consumers expect for this
/// endpoint, so it is kept despite the binary payload.
pub async fn models(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Result<Response> {
    let filter = IdFilter::parse(query.ids.as_deref());
    let blobs = state.blobs.find_blobs(&filter).await?;
    if blobs.is_empty() {
        return Err(ApiError::not_found("no building models matched"));
    }

    // Small payloads buffer fully so a failing read still yields a clean
    // error status. Past the limit the body streams and a mid-stream
    // failure can only truncate the response.
    let body = if concat::total_length(&blobs) <= BUFFER_LIMIT {
        Body::from(concat::concat_buffered(state.blobs.clone(), blobs).await?)
    } else {
        Body::from_stream(concat::concat_stream(state.blobs.clone(), blobs))
    };
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// `GET /buildings/tilesInfo` — the `tiles` array of the tile-info document.
pub async fn tiles_info(State(state): State<Arc<AppState>>) -> Result<Response> {
    let doc = state
        .documents
        .find_one(TILE_INFO_COLLECTION)
        .await?
        .ok_or_else(|| ApiError::not_found("tile info not available"))?;
    let tiles = doc
        .get("tiles")
        .cloned()
        .ok_or_else(|| ApiError::not_found("tile info has no tiles"))?;
    Ok(Json(tiles).into_response())
}

/// `GET /buildings/attributes?ids=` — attribute documents as a JSON array.
pub async fn attributes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Result<Response> {
    let filter = IdFilter::parse(query.ids.as_deref());
    let docs = state
        .documents
        .find_documents(ATTRIBUTES_COLLECTION, &filter)
        .await?;
    if docs.is_empty() {
        return Err(ApiError::not_found("no building attributes matched"));
    }
    Ok(Json(docs).into_response())
}
