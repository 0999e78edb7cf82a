//! Error types for the REST front end.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use errors::NotesError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for request handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Result type alias for server lifecycle operations.
pub type Result<T> = std::result::Result<T, RestServerError>;

/// Request-level error, rendered as the HTTP error body.
///
/// Wraps [`NotesError`] so handlers can use `?` on service calls; the
/// status and code mapping lives in the [`IntoResponse`] impl.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct ApiError(#[from] pub NotesError);

/// Error response body for HTTP endpoints.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self.0 {
            NotesError::InvalidInput { .. } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.0.to_string(),
                None,
            ),
            NotesError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.0.to_string(), None)
            }
            NotesError::ReadOnly { .. } => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", self.0.to_string(), None)
            }
            NotesError::Upstream(cause) => {
                tracing::error!(error = %cause, "Upstream Keep call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    "The notes service request failed".to_string(),
                    Some(cause.to_string()),
                )
            }
        };

        if status != StatusCode::INTERNAL_SERVER_ERROR {
            tracing::debug!(code, error = %self.0, "Request rejected");
        }

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Errors surfaced by the REST server lifecycle.
///
/// Startup faults only; request failures travel as [`ApiError`].
#[derive(Error, Debug)]
pub enum RestServerError {
    /// Configuration could not be loaded or was invalid
    #[error("Configuration error: {0}")]
    Config(#[from] errors::ConfigError),

    /// The external client could not be constructed
    #[error("Keep client error: {0}")]
    Client(#[from] errors::KeepClientError),

    /// Bind or serve failure
    #[error("Server error: {0}")]
    Server(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_400() {
        let error = ApiError(NotesError::InvalidInput {
            field: "query".to_string(),
            reason: "must not be empty".to_string(),
        });
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let error = ApiError(NotesError::NotFound {
            id: "ghost".to_string(),
        });
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_read_only_maps_to_403() {
        let error = ApiError(NotesError::ReadOnly {
            id: "n1".to_string(),
            label: "keep-mcp".to_string(),
        });
        assert_eq!(error.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_error_response_without_details() {
        let body = ErrorResponse {
            error: "test error".to_string(),
            code: "TEST_ERROR".to_string(),
            details: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_server_error_display() {
        let error = RestServerError::Server("bind failed".to_string());
        assert_eq!(error.to_string(), "Server error: bind failed");
    }
}
