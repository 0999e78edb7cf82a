//! HTTP request handlers for the REST front end.
//!
//! Thin adapters: deserialize the request, call [`notes::NotesService`],
//! serialize the result. Status mapping for failures lives in
//! [`crate::error::ApiError`].

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use kp_core::{Note, NotePatch};
use notes::{DeleteReceipt, NoteCollection};

use crate::error::{ApiResult, ErrorResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        root,
        health,
        list_notes,
        search_notes,
        get_note,
        create_note,
        update_note,
        delete_note
    ),
    components(
        schemas(
            Note,
            NoteCollection,
            DeleteReceipt,
            HealthResponse,
            NoteBody,
            ErrorResponse
        )
    ),
    tags(
        (name = "notes", description = "Note operations"),
        (name = "system", description = "Service info and health")
    )
)]
pub struct ApiDoc;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
    pub google_keep_connected: bool,
    pub version: String,
}

/// Query parameters for note search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query string
    #[serde(default)]
    pub query: String,
}

/// Request body for note creation and update.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NoteBody {
    /// Note title
    pub title: Option<String>,
    /// Note text content
    pub text: Option<String>,
}

/// GET /openapi.json
///
/// The generated OpenAPI document.
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Service information", body = serde_json::Value)
    )
)]
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "service": "Google Keep REST API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health or /api/health",
            "list": "GET /api/notes",
            "search": "GET /api/notes/search?query=...",
            "create": "POST /api/notes",
            "get": "GET /api/notes/{note_id}",
            "update": "PUT /api/notes/{note_id}",
            "delete": "DELETE /api/notes/{note_id}"
        },
        "docs": "/openapi.json"
    }))
}

/// Health check endpoint.
///
/// Always answers 200; a failed upstream probe is reported in the body, not
/// the status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status, connected) = match state.service.ping().await {
        Ok(()) => ("healthy", true),
        Err(e) => {
            tracing::warn!(error = %e, "Keep health check failed");
            ("unhealthy", false)
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        service: "google-keep-rest-api".to_string(),
        google_keep_connected: connected,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/api/notes",
    tag = "notes",
    responses(
        (status = 200, description = "All notes", body = NoteCollection),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    )
)]
pub async fn list_notes(State(state): State<Arc<AppState>>) -> ApiResult<Json<NoteCollection>> {
    let collection = state.service.list().await?;
    Ok(Json(collection))
}

#[utoipa::path(
    get,
    path = "/api/notes/search",
    tag = "notes",
    responses(
        (status = 200, description = "Matching notes", body = NoteCollection),
        (status = 400, description = "Empty query", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    ),
    params(
        ("query" = String, Query, description = "Search query string")
    )
)]
pub async fn search_notes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<NoteCollection>> {
    let collection = state.service.search(&params.query).await?;
    Ok(Json(collection))
}

#[utoipa::path(
    get,
    path = "/api/notes/{note_id}",
    tag = "notes",
    responses(
        (status = 200, description = "Note fetched successfully", body = Note),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    ),
    params(
        ("note_id" = String, Path, description = "Note ID")
    )
)]
pub async fn get_note(
    State(state): State<Arc<AppState>>,
    Path(note_id): Path<String>,
) -> ApiResult<Json<Note>> {
    let note = state.service.get(&note_id).await?;
    Ok(Json(note))
}

#[utoipa::path(
    post,
    path = "/api/notes",
    tag = "notes",
    request_body = NoteBody,
    responses(
        (status = 201, description = "Note created", body = Note),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    )
)]
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NoteBody>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let note = state.service.create(body.title, body.text).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

#[utoipa::path(
    put,
    path = "/api/notes/{note_id}",
    tag = "notes",
    request_body = NoteBody,
    responses(
        (status = 200, description = "Note updated", body = Note),
        (status = 403, description = "Note is not managed by this system", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    ),
    params(
        ("note_id" = String, Path, description = "Note ID")
    )
)]
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    Path(note_id): Path<String>,
    Json(body): Json<NoteBody>,
) -> ApiResult<Json<Note>> {
    let patch = NotePatch {
        title: body.title,
        text: body.text,
    };
    let note = state.service.update(&note_id, patch).await?;
    Ok(Json(note))
}

#[utoipa::path(
    delete,
    path = "/api/notes/{note_id}",
    tag = "notes",
    responses(
        (status = 200, description = "Note marked for deletion", body = DeleteReceipt),
        (status = 403, description = "Note is not managed by this system", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    ),
    params(
        ("note_id" = String, Path, description = "Note ID")
    )
)]
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(note_id): Path<String>,
) -> ApiResult<Json<DeleteReceipt>> {
    let receipt = state.service.delete(&note_id).await?;
    Ok(Json(receipt))
}
