//! HTTP route table and request handlers.

mod buildings;
mod sewers;
mod static_files;
mod terrain;
mod weather;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Query parameters shared by the id-filtered endpoints.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    /// Comma-separated integer id list.
    pub ids: Option<String>,
}

/// Build the application router.
///
/// The route set is fixed at startup; dispatch is resolved by the typed
/// router, not a path-keyed handler map. CORS is permissive since the API
/// fronts a browser-based viewer.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/buildings", get(buildings::models))
        .route("/buildings/tilesInfo", get(buildings::tiles_info))
        .route("/buildings/attributes", get(buildings::attributes))
        .route("/terrain/dem/:resolution", get(terrain::dem_layer))
        .route("/terrain/dem/:resolution/*path", get(terrain::dem_tile))
        .route("/terrain/3dmesh", get(terrain::mesh_tileset))
        .route("/terrain/3dmesh/*path", get(terrain::mesh_tile))
        .route("/metrostation/pointcloud", get(terrain::pointcloud_tileset))
        .route("/metrostation/pointcloud/*path", get(terrain::pointcloud_tile))
        .route("/sewers/shafts/points", get(sewers::shaft_points))
        .route("/sewers/shafts/points/bboxInfo", get(sewers::shaft_points_bbox))
        .route("/sewers/shafts/lines", get(sewers::shaft_lines))
        .route("/sewers/shafts/lines/bboxInfo", get(sewers::shaft_lines_bbox))
        .route("/sewers/shafts/attributes", get(sewers::shaft_attributes))
        .route("/sewers/pipes", get(sewers::pipes))
        .route("/sewers/pipes/bboxInfo", get(sewers::pipes_bbox))
        .route("/sewers/pipes/attributes", get(sewers::pipe_attributes))
        .route("/weather/:measurement", get(weather::measurements))
        .route(
            "/weather/:measurement/timeseries/:sensor_id",
            get(weather::timeseries),
        )
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any))
        .layer(TraceLayer::new_for_http())
}
