//! Server setup and lifecycle for the REST front end.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

use config::{AppConfig, RestServerConfig};

use crate::error::{Result, RestServerError};
use crate::routes::create_router;
use crate::state::AppState;

/// The Keep REST API server.
pub struct KeepRestServer {
    state: Arc<AppState>,
    config: RestServerConfig,
}

impl KeepRestServer {
    /// Creates a new server instance with the given configuration.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let state = Arc::new(AppState::new(config)?);
        Ok(Self {
            state,
            config: config.rest.clone(),
        })
    }

    /// Creates a server instance from an existing `AppState`.
    pub fn with_state(state: Arc<AppState>, config: RestServerConfig) -> Self {
        Self { state, config }
    }

    /// Runs the HTTP server.
    ///
    /// This method blocks until the server is shut down (e.g., via Ctrl+C).
    pub async fn run(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| RestServerError::Server(format!("Invalid address: {e}")))?;

        let router = create_router(self.state.clone());

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| RestServerError::Server(format!("Failed to bind to {addr}: {e}")))?;

        tracing::info!(%addr, "Keep REST API server starting");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| RestServerError::Server(format!("Server error: {e}")))?;

        tracing::info!("Keep REST API server stopped");
        Ok(())
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }
}

/// Signal handler for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        () = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        },
    }
}

/// Entry point for running the server from environment variables.
///
/// This is a convenience function for containerized deployments.
pub async fn run_from_env() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = config::load_from_env()?;

    tracing::info!(
        host = %config.rest.host,
        port = config.rest.port,
        "Configuration loaded"
    );
    if config.safety.unsafe_mode {
        tracing::warn!("UNSAFE_MODE is enabled, the managed-label check is off");
    }

    let server = KeepRestServer::new(&config)?;
    server.run().await
}
