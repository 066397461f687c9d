//! HTTP contract tests for the reference-data gateway.
//!
//! The router runs against an in-memory store, so no seed directory or
//! listening socket is needed.

use std::sync::Arc;

use axum::body::Body;
use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use serde_json::json;
use taxonomy_core::{Limits, StoreBuilder, TaxonomyStore};
use taxonomy_server::router::build_router;
use tower::ServiceExt;

// ── Test app builder ───────────────────────────────────────────

fn docs<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Vec<T> {
    serde_json::from_value(value).expect("fixture documents")
}

fn test_store() -> TaxonomyStore {
    StoreBuilder::new()
        .nice_groups(docs(json!([
            {"_id": "g9", "group": 9, "name_vi": "Thiết bị khoa học", "name_en": "Scientific apparatus", "type": "goods"},
            {"_id": "g35", "group": 35, "name_vi": "Quảng cáo", "type": "services"}
        ])))
        .nice_classes(docs(json!([
            {"_id": "n1", "group": 9, "code": "090001", "name_vi": "Phần mềm máy tính", "name_en": "Computer software"},
            {"_id": "n2", "group": 9, "code": "090652", "name_vi": "Phần mềm trò chơi", "name_en": "Game software"},
            {"_id": "n3", "group": 35, "code": "350039", "name_vi": "Quảng cáo trực tuyến", "name_en": "Online advertising"}
        ])))
        .vienna_classes(docs(json!([
            {"_id": "v1", "category": 1, "category_desc_en": "Celestial bodies",
             "division": "1.1", "division_desc_en": "Stars, comets",
             "section": "1.1.1", "section_desc_en": "Stars"},
            {"_id": "v2", "category": 26, "category_desc_en": "Geometrical figures",
             "division": "26.1", "division_desc_en": "Circles",
             "section": "26.1.1", "section_desc_en": "Circles with a star"}
        ])))
        .countries(docs(json!([
            {"_id": "c1", "code": "VN", "country_name": "Viet Nam", "note": "Madrid member"}
        ])))
        .companies(docs(json!([
            {"_id": "co2", "short_name": "ZETA", "name": "Zeta Foods"},
            {"_id": "co1", "short_name": "ACME", "name": "Acme Trading"}
        ])))
        .agencies(docs(json!([
            {"_id": "a1", "short_name": "IPA", "name": "IP Agency", "tax_code": 123456}
        ])))
        .build(Limits::default())
}

fn build_test_app() -> axum::Router {
    build_router(Arc::new(test_store()))
}

async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = build_test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ── Tests ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_reports_counts() {
    let (status, body) = get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["niceClasses"], 3);
    assert_eq!(body["data"]["viennaClasses"], 2);
    assert!(body["data"]["loadedAt"].is_string());
}

#[tokio::test]
async fn test_nice_groups_ordered() {
    let (status, body) = get("/api/reference/nice-groups").await;
    assert_eq!(status, StatusCode::OK);
    let groups = body["data"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["group"], 9);
    assert_eq!(groups[1]["group"], 35);
}

#[tokio::test]
async fn test_nice_classes_by_group() {
    let (status, body) = get("/api/reference/nice-classes?class_number=9").await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["group"] == 9));
    assert_eq!(body["data"]["grouped"]["9"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_nice_classes_search_is_case_insensitive() {
    let (_, body) = get("/api/reference/nice-classes?search=SOFTWARE").await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);

    let (_, body) = get("/api/reference/nice-classes?search=350039").await;
    assert_eq!(body["data"]["items"][0]["id"], "n3");
}

#[tokio::test]
async fn test_nice_classes_rejects_bad_class_number() {
    let (status, body) = get("/api/reference/nice-classes?class_number=nine").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("class_number"));

    let (status, _) = get("/api/reference/nice-classes?class_number=46").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_vienna_search_spans_categories() {
    let (status, body) = get("/api/reference/vienna-classes?search=star").await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    let categories: Vec<u64> = items
        .iter()
        .map(|i| i["category"].as_u64().unwrap())
        .collect();
    assert_eq!(categories, vec![1, 26]);
}

#[tokio::test]
async fn test_vienna_category_filter() {
    let (_, body) = get("/api/reference/vienna-classes?category=26").await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "v2");
}

#[tokio::test]
async fn test_select_lists() {
    let (_, body) = get("/api/reference/countries").await;
    assert_eq!(body["data"][0]["label"], "VN - Viet Nam");
    assert_eq!(body["data"][0]["value"], "VN");

    let (_, body) = get("/api/reference/companies").await;
    assert_eq!(body["data"][0]["label"], "ACME - Acme Trading");
    assert_eq!(body["data"][0]["value"], "co1");

    let (_, body) = get("/api/reference/agencies").await;
    assert_eq!(body["data"][0]["taxCode"], "123456");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let resp = build_test_app()
        .oneshot(
            Request::builder()
                .uri("/api/reference/designs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
