//! Server setup and lifecycle for the MCP front end.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

use config::{AppConfig, McpServerConfig, McpTransport};

use crate::error::{McpServerError, Result};
use crate::routes::create_router;
use crate::state::AppState;
use crate::stdio;

/// The Keep MCP server.
pub struct KeepMcpServer {
    state: Arc<AppState>,
    config: McpServerConfig,
}

impl KeepMcpServer {
    /// Creates a new server instance with the given configuration.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let state = Arc::new(AppState::new(config)?);
        Ok(Self {
            state,
            config: config.mcp.clone(),
        })
    }

    /// Creates a server instance from an existing `AppState`.
    pub fn with_state(state: Arc<AppState>, config: McpServerConfig) -> Self {
        Self { state, config }
    }

    /// Runs the configured transport.
    ///
    /// This method blocks until the server is shut down (e.g., via Ctrl+C
    /// for the ws transport, or stdin closing for stdio).
    pub async fn run(self) -> Result<()> {
        match self.config.transport {
            McpTransport::Stdio => stdio::run(self.state.mcp.clone()).await,
            McpTransport::Ws => self.run_ws().await,
        }
    }

    async fn run_ws(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| McpServerError::Server(format!("Invalid address: {e}")))?;

        let router = create_router(self.state.clone(), &self.config.path);

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| McpServerError::Server(format!("Failed to bind to {addr}: {e}")))?;

        tracing::info!(%addr, path = %self.config.path, "Keep MCP server starting");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| McpServerError::Server(format!("Server error: {e}")))?;

        tracing::info!("Keep MCP server stopped");
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
    let config = config::load_from_env()?;
    init_tracing(config.mcp.transport);

    tracing::info!(
        transport = %config.mcp.transport,
        host = %config.mcp.host,
        port = config.mcp.port,
        "Configuration loaded"
    );
    if config.safety.unsafe_mode {
        tracing::warn!("UNSAFE_MODE is enabled, the managed-label check is off");
    }

    let server = KeepMcpServer::new(&config)?;
    server.run().await
}

/// Initializes the tracing subscriber.
///
/// The stdio transport owns stdout for the protocol stream, so its logs go
/// to stderr.
fn init_tracing(transport: McpTransport) {
    let filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    if transport == McpTransport::Stdio {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
