//! HTTP request handlers for the MCP front end.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub google_keep_connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check endpoint.
///
/// Probes the external service and returns 200 when it answers, 503 with the
/// failure reason otherwise.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.service.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                service: "google-keep-mcp".to_string(),
                google_keep_connected: true,
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Keep health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    service: "google-keep-mcp".to_string(),
                    google_keep_connected: false,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
