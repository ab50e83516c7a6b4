//! Terrain DEM, 3D mesh and point-cloud tile endpoints.
//!
//! These serve pre-generated static tile trees. The base endpoint of each
//! tree returns its descriptor (`layer.json` for DEM, `tileset.json` for
//! mesh and point cloud); clients then request nested tiles directly by
//! path.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;

use crate::error::{ApiError, Result};
use crate::routes::static_files;
use crate::state::AppState;

/// DEM resolutions with a pre-generated tile tree, in meters per grid cell.
const DEM_RESOLUTIONS: [u32; 4] = [1, 10, 25, 50];

const MESH_DIR: &str = "3dmesh";
const POINTCLOUD_DIR: &str = "pointcloud";

fn dem_dir(resolution: &str) -> Result<String> {
    let parsed: u32 = resolution
        .parse()
        .map_err(|_| ApiError::not_found(format!("unknown DEM resolution: {resolution}")))?;
    if !DEM_RESOLUTIONS.contains(&parsed) {
        return Err(ApiError::not_found(format!(
            "unknown DEM resolution: {resolution}"
        )));
    }
    Ok(format!("terrain{parsed}"))
}

/// `GET /terrain/dem/:resolution` — the layer descriptor for a resolution.
pub async fn dem_layer(
    State(state): State<Arc<AppState>>,
    Path(resolution): Path<String>,
) -> Result<Response> {
    let dir = dem_dir(&resolution)?;
    static_files::serve(&state.data_dir.join(dir), "layer.json").await
}

/// `GET /terrain/dem/:resolution/*path` — a tile under a resolution's tree.
pub async fn dem_tile(
    State(state): State<Arc<AppState>>,
    Path((resolution, path)): Path<(String, String)>,
) -> Result<Response> {
    let dir = dem_dir(&resolution)?;
    static_files::serve(&state.data_dir.join(dir), &path).await
}

/// `GET /terrain/3dmesh` — the mesh tileset descriptor.
pub async fn mesh_tileset(State(state): State<Arc<AppState>>) -> Result<Response> {
    static_files::serve(&state.data_dir.join(MESH_DIR), "tileset.json").await
}

/// `GET /terrain/3dmesh/*path` — a nested mesh tile.
pub async fn mesh_tile(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response> {
    static_files::serve(&state.data_dir.join(MESH_DIR), &path).await
}

/// `GET /metrostation/pointcloud` — the point-cloud tileset descriptor.
pub async fn pointcloud_tileset(State(state): State<Arc<AppState>>) -> Result<Response> {
    static_files::serve(&state.data_dir.join(POINTCLOUD_DIR), "tileset.json").await
}

/// `GET /metrostation/pointcloud/*path` — a nested point-cloud tile.
pub async fn pointcloud_tile(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response> {
    static_files::serve(&state.data_dir.join(POINTCLOUD_DIR), &path).await
}
