//! Sewer network feature, bbox and attribute endpoints.
//!
//! Points, lines and pipes share one pipeline: parse the id filter, query
//! the collection with the projection for its kind, refuse empty result
//! sets, then splice the serialized features into a FeatureCollection
//! envelope.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use citytwin_store::geojson::{join_features, wrap_feature_collection};
use citytwin_store::{CollectionKind, IdFilter};

use crate::error::{ApiError, Result};
use crate::routes::IdQuery;
use crate::state::AppState;

const SHAFT_POINTS: &str = "sewers.shafts.points";
const SHAFT_LINES: &str = "sewers.shafts.lines";
const PIPES: &str = "sewers.pipes";
const SHAFT_ATTRIBUTES: &str = "sewers.shafts.attributes";
const PIPE_ATTRIBUTES: &str = "sewers.pipes.attributes";

async fn feature_collection(
    state: &AppState,
    collection: &str,
    kind: CollectionKind,
    ids: Option<&str>,
) -> Result<Response> {
    let filter = IdFilter::parse(ids);
    let features = state.documents.find_features(collection, &filter, kind).await?;
    if features.is_empty() {
        return Err(ApiError::not_found(format!("no features matched in {collection}")));
    }
    let body = wrap_feature_collection(&join_features(&features))?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

async fn bbox(state: &AppState, collection: &str) -> Result<Response> {
    let doc = state
        .documents
        .find_one(&format!("{collection}.bboxInfo"))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("no bbox info for {collection}")))?;
    Ok(Json(doc).into_response())
}

async fn attributes(state: &AppState, collection: &str, ids: Option<&str>) -> Result<Response> {
    let filter = IdFilter::parse(ids);
    let docs = state.documents.find_documents(collection, &filter).await?;
    if docs.is_empty() {
        return Err(ApiError::not_found(format!("no attributes matched in {collection}")));
    }
    Ok(Json(docs).into_response())
}

pub async fn shaft_points(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Result<Response> {
    feature_collection(&state, SHAFT_POINTS, CollectionKind::Shaft, query.ids.as_deref()).await
}

pub async fn shaft_points_bbox(State(state): State<Arc<AppState>>) -> Result<Response> {
    bbox(&state, SHAFT_POINTS).await
}

pub async fn shaft_lines(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Result<Response> {
    feature_collection(&state, SHAFT_LINES, CollectionKind::Shaft, query.ids.as_deref()).await
}

pub async fn shaft_lines_bbox(State(state): State<Arc<AppState>>) -> Result<Response> {
    bbox(&state, SHAFT_LINES).await
}

pub async fn shaft_attributes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Result<Response> {
    attributes(&state, SHAFT_ATTRIBUTES, query.ids.as_deref()).await
}

pub async fn pipes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Result<Response> {
    feature_collection(&state, PIPES, CollectionKind::Pipe, query.ids.as_deref()).await
}

pub async fn pipes_bbox(State(state): State<Arc<AppState>>) -> Result<Response> {
    bbox(&state, PIPES).await
}

pub async fn pipe_attributes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Result<Response> {
    attributes(&state, PIPE_ATTRIBUTES, query.ids.as_deref()).await
}
