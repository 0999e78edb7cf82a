//! Route definitions for the REST front end.

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the Axum router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - allow any origin for browser-based clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/notes",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route("/notes/search", get(handlers::search_notes))
        .route(
            "/notes/{note_id}",
            get(handlers::get_note)
                .put(handlers::update_note)
                .delete(handlers::delete_note),
        )
        .route("/health", get(handlers::health));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(handlers::openapi))
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::AppConfig;
    use testing::FakeKeepClient;

    #[test]
    fn test_router_construction() {
        let state = Arc::new(AppState::with_client(
            Arc::new(FakeKeepClient::new()),
            &AppConfig::default(),
        ));
        let _router = create_router(state);
    }
}
