//! Error types for the MCP front end.

use thiserror::Error;

/// Errors surfaced by the MCP server lifecycle.
///
/// Per-request failures never reach this type; those travel back to the
/// client as JSON-RPC error objects. This covers startup and transport
/// faults only.
#[derive(Error, Debug)]
pub enum McpServerError {
    /// Configuration could not be loaded or was invalid
    #[error("Configuration error: {0}")]
    Config(#[from] errors::ConfigError),

    /// The external client could not be constructed
    #[error("Keep client error: {0}")]
    Client(#[from] errors::KeepClientError),

    /// Bind or serve failure
    #[error("Server error: {0}")]
    Server(String),

    /// Stdio transport I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for MCP server operations.
pub type Result<T> = std::result::Result<T, McpServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = McpServerError::Server("bind failed".to_string());
        assert_eq!(error.to_string(), "Server error: bind failed");
    }

    #[test]
    fn test_config_error_conversion() {
        let source = errors::ConfigError::Missing {
            key: "GOOGLE_EMAIL".to_string(),
        };
        let error: McpServerError = source.into();
        assert!(error.to_string().contains("GOOGLE_EMAIL"));
    }
}
