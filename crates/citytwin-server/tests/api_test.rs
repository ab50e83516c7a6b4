//! HTTP-level tests for the database-backed and static-file endpoints,
//! driven against the in-memory store via `tower::ServiceExt::oneshot`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use citytwin_sensors::{SensorClient, SensorRegistry};
use citytwin_server::{build_router, AppState};
use citytwin_store::MemoryStore;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router_with(store: MemoryStore, data_dir: PathBuf) -> Router {
    let store = Arc::new(store);
    build_router(AppState::with_parts(
        store.clone(),
        store,
        SensorRegistry::default(),
        SensorClient::new(Duration::from_secs(5)).unwrap(),
        data_dir,
    ))
}

fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert_blob(1, "model_1.glb", &b"MODEL-ONE"[..]);
    store.insert_blob(2, "model_2.glb", &b"MODEL-TWO"[..]);
    store.insert_blob(3, "model_3.glb", &b"MODEL-THREE"[..]);
    store.insert_document(
        "buildings.tileInfo",
        json!({ "_id": "t", "tiles": [{ "x": 0, "y": 0 }, { "x": 0, "y": 1 }] }),
    );
    for id in [2, 5] {
        store.insert_document(
            "buildings.attributes",
            json!({ "_id": format!("a{id}"), "id": id, "name": format!("building {id}") }),
        );
    }
    for id in [10, 11] {
        store.insert_document(
            "sewers.shafts.points",
            json!({
                "_id": format!("s{id}"),
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [7.2, 51.5] },
                "properties": { "id": id, "color": "#00ff00", "top": 61.2, "bottom": 58.0,
                                "material": "concrete" }
            }),
        );
    }
    store.insert_document(
        "sewers.pipes",
        json!({
            "_id": "p1",
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": [[7.2, 51.5], [7.3, 51.6]] },
            "properties": { "id": 20, "color": "#ff0000", "diameter": 0.3 }
        }),
    );
    store.insert_document(
        "sewers.pipes.bboxInfo",
        json!({ "_id": "b", "min": [7.1, 51.4], "max": [7.4, 51.7] }),
    );
    store
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, content_type, body)
}

#[tokio::test]
async fn test_buildings_concatenates_matched_models_in_order() {
    let router = router_with(seeded_store(), PathBuf::from("/nonexistent"));
    let (status, content_type, body) = get(&router, "/buildings?ids=1,3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, b"MODEL-ONEMODEL-THREE");
}

#[tokio::test]
async fn test_buildings_without_ids_returns_every_model() {
    let router = router_with(seeded_store(), PathBuf::from("/nonexistent"));
    let (status, _, body) = get(&router, "/buildings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"MODEL-ONEMODEL-TWOMODEL-THREE");
}

#[tokio::test]
async fn test_buildings_unmatched_ids_is_404() {
    let router = router_with(seeded_store(), PathBuf::from("/nonexistent"));
    let (status, _, _) = get(&router, "/buildings?ids=99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_buildings_non_numeric_ids_match_nothing() {
    // `ids=abc` must not degenerate into a match-all query.
    let router = router_with(seeded_store(), PathBuf::from("/nonexistent"));
    let (status, _, _) = get(&router, "/buildings?ids=abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tiles_info_returns_tiles_array_directly() {
    let router = router_with(seeded_store(), PathBuf::from("/nonexistent"));
    let (status, _, body) = get(&router, "/buildings/tilesInfo").await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed, json!([{ "x": 0, "y": 0 }, { "x": 0, "y": 1 }]));
}

#[tokio::test]
async fn test_building_attributes_filters_on_top_level_id() {
    let router = router_with(seeded_store(), PathBuf::from("/nonexistent"));
    let (status, _, body) = get(&router, "/buildings/attributes?ids=5,999").await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed, json!([{ "id": 5, "name": "building 5" }]));
}

#[tokio::test]
async fn test_shaft_points_returns_projected_feature_collection() {
    let router = router_with(seeded_store(), PathBuf::from("/nonexistent"));
    let (status, content_type, body) = get(&router, "/sewers/shafts/points").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["type"], "FeatureCollection");
    let features = parsed["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    // Shaft projection keeps elevations but drops unprojected properties.
    assert_eq!(features[0]["properties"]["top"], 61.2);
    assert!(features[0]["properties"].get("material").is_none());
    assert!(features[0].get("_id").is_none());
}

#[tokio::test]
async fn test_pipes_projection_keeps_diameter() {
    let router = router_with(seeded_store(), PathBuf::from("/nonexistent"));
    let (status, _, body) = get(&router, "/sewers/pipes?ids=20").await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["features"][0]["properties"]["diameter"], 0.3);
}

#[tokio::test]
async fn test_pipes_with_unknown_id_is_404_without_envelope() {
    let router = router_with(seeded_store(), PathBuf::from("/nonexistent"));
    let (status, _, body) = get(&router, "/sewers/pipes?ids=999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!String::from_utf8(body).unwrap().contains("FeatureCollection"));
}

#[tokio::test]
async fn test_pipes_bbox_info_returns_single_document() {
    let router = router_with(seeded_store(), PathBuf::from("/nonexistent"));
    let (status, _, body) = get(&router, "/sewers/pipes/bboxInfo").await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed, json!({ "min": [7.1, 51.4], "max": [7.4, 51.7] }));
}

#[tokio::test]
async fn test_empty_collection_is_404_not_empty_collection() {
    let router = router_with(seeded_store(), PathBuf::from("/nonexistent"));
    let (status, _, _) = get(&router, "/sewers/shafts/lines").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = get(&router, "/sewers/shafts/lines/bboxInfo").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_body_is_json() {
    let router = router_with(seeded_store(), PathBuf::from("/nonexistent"));
    let (status, content_type, body) = get(&router, "/buildings?ids=99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["status"], 404);
    assert!(parsed["error"].is_string());
}

mod terrain {
    use super::*;

    /// Unique on-disk tile tree for one test.
    fn tile_tree(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("citytwin-{}-{name}", std::process::id()));
        let dem = root.join("terrain10");
        std::fs::create_dir_all(dem.join("0/0")).unwrap();
        std::fs::write(dem.join("layer.json"), br#"{"tilejson":"2.1.0"}"#).unwrap();
        std::fs::write(dem.join("0/0/0.terrain"), b"\x01\x02\x03").unwrap();
        let mesh = root.join("3dmesh");
        std::fs::create_dir_all(&mesh).unwrap();
        std::fs::write(mesh.join("tileset.json"), br#"{"asset":{"version":"1.0"}}"#).unwrap();
        root
    }

    #[tokio::test]
    async fn test_dem_layer_and_nested_tile() {
        let router = router_with(MemoryStore::new(), tile_tree("dem"));
        let (status, content_type, body) = get(&router, "/terrain/dem/10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body, br#"{"tilejson":"2.1.0"}"#);

        let (status, content_type, body) = get(&router, "/terrain/dem/10/0/0/0.terrain").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/octet-stream"));
        assert_eq!(body, b"\x01\x02\x03");
    }

    #[tokio::test]
    async fn test_unknown_dem_resolution_is_404() {
        let router = router_with(MemoryStore::new(), tile_tree("res"));
        for uri in ["/terrain/dem/2", "/terrain/dem/100", "/terrain/dem/ten"] {
            let (status, _, _) = get(&router, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_missing_tile_is_404() {
        let router = router_with(MemoryStore::new(), tile_tree("missing"));
        let (status, _, _) = get(&router, "/terrain/dem/10/9/9/9.terrain").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_mesh_tileset_descriptor() {
        let router = router_with(MemoryStore::new(), tile_tree("mesh"));
        let (status, _, body) = get(&router, "/terrain/3dmesh").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, br#"{"asset":{"version":"1.0"}}"#);
    }

    #[tokio::test]
    async fn test_pointcloud_without_tree_is_404() {
        let router = router_with(MemoryStore::new(), tile_tree("pc"));
        let (status, _, _) = get(&router, "/metrostation/pointcloud").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
