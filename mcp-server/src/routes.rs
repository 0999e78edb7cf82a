//! Route definitions for the MCP front end.

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Creates the Axum router with the WebSocket endpoint mounted at `ws_path`.
pub fn create_router(state: Arc<AppState>, ws_path: &str) -> Router {
    Router::new()
        .route(ws_path, get(ws::ws_handler))
        .route("/health", get(handlers::health))
        .route("/api/health", get(handlers::health))
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
        let _router = create_router(state, "/mcp");
    }
}
