//! Application state for the REST front end.

use std::sync::Arc;

use config::AppConfig;
use keep_client::HttpKeepClient;
use kp_core::KeepClient;
use notes::{NotesService, SafetyPolicy};

use crate::error::Result;

/// Shared state behind the REST routes.
pub struct AppState {
    /// Shared pipeline every handler delegates to.
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
        Self { service }
    }
}
