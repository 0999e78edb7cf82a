//! Application state for the MCP front end.

use std::sync::Arc;
use std::time::Duration;

use config::AppConfig;
use keep_client::HttpKeepClient;
use kp_core::KeepClient;
use notes::{NotesService, SafetyPolicy};
use tools::server::McpServer;

use crate::error::Result;

/// Shared state behind the WebSocket and health routes.
pub struct AppState {
    /// JSON-RPC dispatcher with the six note tools registered.
    pub mcp: Arc<McpServer>,
    /// Shared pipeline, used directly by the health probe.
    pub service: Arc<NotesService>,
}

impl AppState {
    /// Creates state backed by the real HTTP client.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Arc::new(HttpKeepClient::new(&config.keep)?);
        Ok(Self::with_client(client, config))
    }

    /// Creates state around an existing client.
    ///
    /// Tests use this to substitute an in-memory fake for the external
    /// service.
    pub fn with_client(client: Arc<dyn KeepClient>, config: &AppConfig) -> Self {
        let service = Arc::new(NotesService::new(
            client,
            SafetyPolicy::new(config.safety.unsafe_mode),
        ));
        let mcp = Arc::new(
            McpServer::new(service.clone())
                .with_timeout(Duration::from_secs(config.mcp.request_timeout_seconds)),
        );

        Self { mcp, service }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testing::FakeKeepClient;

    #[tokio::test]
    async fn test_state_wires_policy_from_config() {
        let mut config = AppConfig::default();
        config.safety.unsafe_mode = true;

        let state = AppState::with_client(Arc::new(FakeKeepClient::new()), &config);
        assert!(state.service.policy().unsafe_mode());
    }
}
