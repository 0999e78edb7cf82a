//! Integration tests driving the full router in-process.
//!
//! Every test builds a router over the in-memory fake client and issues
//! requests with `tower::ServiceExt::oneshot`, asserting on the wire-level
//! contract: status codes, error bodies, and payload shapes.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use config::AppConfig;
use kp_core::Note;
use rest_api::routes::create_router;
use rest_api::state::AppState;
use testing::{FakeKeepClient, managed_note, unique_note_id, unmanaged_note};

fn app(notes: Vec<Note>, unsafe_mode: bool) -> (Router, Arc<FakeKeepClient>) {
    let client = Arc::new(FakeKeepClient::seeded(notes));
    let mut config = AppConfig::default();
    config.safety.unsafe_mode = unsafe_mode;
    let state = Arc::new(AppState::with_client(client.clone(), &config));
    (create_router(state), client)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let (app, _) = app(vec![], false);

    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "Google Keep REST API");
    assert_eq!(body["endpoints"]["list"], "GET /api/notes");
    assert_eq!(body["endpoints"]["update"], "PUT /api/notes/{note_id}");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (app, _) = app(vec![], false);

    let (status, body) = get(&app, "/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/notes"].is_object());
    assert!(body["components"]["schemas"]["Note"].is_object());
}

#[tokio::test]
async fn test_health_reports_healthy() {
    let (app, _) = app(vec![], false);

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "google-keep-rest-api");
    assert_eq!(body["google_keep_connected"], true);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_stays_200_when_upstream_down() {
    let (app, client) = app(vec![], false);
    client.set_unavailable(true);

    let (status, body) = get(&app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["google_keep_connected"], false);
}

#[tokio::test]
async fn test_list_notes() {
    let (app, _) = app(
        vec![
            managed_note("n1", "Groceries", "milk"),
            unmanaged_note("n2", "Someday", "learn sailing"),
        ],
        false,
    );

    let (status, body) = get(&app, "/api/notes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["notes"][0]["id"], "n1");
    assert_eq!(body["notes"][1]["labels"], json!([]));
}

#[tokio::test]
async fn test_search_finds_matching_notes() {
    let (app, _) = app(
        vec![
            managed_note("n1", "Groceries", "milk and eggs"),
            managed_note("n2", "Workout", "leg day"),
        ],
        false,
    );

    let (status, body) = get(&app, "/api/notes/search?query=milk").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["notes"][0]["id"], "n1");
}

#[tokio::test]
async fn test_search_empty_query_is_400() {
    let (app, _) = app(vec![managed_note("n1", "a", "b")], false);

    let (status, body) = get(&app, "/api/notes/search?query=").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("query"));
}

#[tokio::test]
async fn test_search_missing_query_is_400() {
    let (app, _) = app(vec![], false);

    let (status, body) = get(&app, "/api/notes/search").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_note() {
    let (app, _) = app(vec![managed_note("n1", "Groceries", "milk")], false);

    let (status, body) = get(&app, "/api/notes/n1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "n1");
    assert_eq!(body["title"], "Groceries");
}

#[tokio::test]
async fn test_get_unknown_note_is_404() {
    let (app, _) = app(vec![], false);

    let (status, body) = get(&app, "/api/notes/ghost").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body["error"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn test_create_note_is_201_and_managed() {
    let (app, client) = app(vec![], false);

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/notes",
        json!({"title": "Groceries", "text": "milk"}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Groceries");
    assert!(
        body["labels"]
            .as_array()
            .unwrap()
            .contains(&json!("keep-mcp"))
    );

    let stored = client.snapshot();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].is_managed());
}

#[tokio::test]
async fn test_create_accepts_empty_body() {
    let (app, _) = app(vec![], false);

    let (status, body) = send_json(&app, "POST", "/api/notes", json!({})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["title"].is_null());
    assert!(body["text"].is_null());
}

#[tokio::test]
async fn test_update_managed_note() {
    let (app, client) = app(vec![managed_note("n1", "Groceries", "milk")], false);

    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/notes/n1",
        json!({"title": "Groceries v2"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Groceries v2");
    // Partial update: the text field was not in the body, so it survives.
    assert_eq!(body["text"], "milk");

    let stored = client.snapshot();
    assert_eq!(stored[0].title.as_deref(), Some("Groceries v2"));
}

#[tokio::test]
async fn test_update_unmanaged_note_is_403() {
    let (app, client) = app(vec![unmanaged_note("theirs", "Private", "hands off")], false);

    let (status, body) = send_json(&app, "PUT", "/api/notes/theirs", json!({"title": "Mine"})).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
    assert!(body["error"].as_str().unwrap().contains("keep-mcp"));
    // Nothing changed upstream.
    assert_eq!(client.snapshot()[0].title.as_deref(), Some("Private"));
}

#[tokio::test]
async fn test_unsafe_mode_allows_unmanaged_update() {
    let (app, _) = app(vec![unmanaged_note("theirs", "Private", "hands off")], true);

    let (status, body) = send_json(&app, "PUT", "/api/notes/theirs", json!({"title": "Mine"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Mine");
}

#[tokio::test]
async fn test_delete_returns_receipt() {
    let id = unique_note_id();
    let (app, client) = app(vec![managed_note(&id, "Groceries", "milk")], false);

    let (status, body) = delete(&app, &format!("/api/notes/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["status"], "success");
    assert!(body["message"].as_str().unwrap().contains(&id));
    assert!(client.snapshot().is_empty());
}

#[tokio::test]
async fn test_delete_unmanaged_note_is_403() {
    let (app, client) = app(vec![unmanaged_note("theirs", "Private", "hands off")], false);

    let (status, body) = delete(&app, "/api/notes/theirs").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
    assert_eq!(client.snapshot().len(), 1);
}

#[tokio::test]
async fn test_delete_unknown_note_is_404() {
    let (app, _) = app(vec![], false);

    let (status, body) = delete(&app, "/api/notes/ghost").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_upstream_failure_is_500() {
    let (app, client) = app(vec![], false);
    client.set_unavailable(true);

    let (status, body) = get(&app, "/api/notes").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert!(body["details"].is_string());
}
