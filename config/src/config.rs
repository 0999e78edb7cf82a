//! # Configuration Structures
//!
//! This module defines the configuration structures for the Keep bridge.
//!
//! All configuration structures:
//! - Use `serde` for serialization/deserialization
//! - Use `validator` for input validation

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main configuration for the Keep bridge.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Aggregates everything both front ends need: external account credentials,
/// bind addresses, and the safety toggle. Built once at startup (usually via
/// [`crate::load_from_env`]) and shared read-only.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_env;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_from_env()?;
///     println!("REST bind: {}:{}", config.rest.host, config.rest.port);
///     Ok(())
/// }
/// ```
///
/// ## Fields
/// - `keep`: external notes service account and endpoint
/// - `mcp`: MCP front end bind address and transport
/// - `rest`: REST front end bind address
/// - `safety`: unsafe-mode toggle for the managed-marker check
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
pub struct AppConfig {
    /// External notes service account and endpoint
    #[serde(default)]
    #[validate(nested)]
    pub keep: KeepConfig,

    /// MCP front end settings
    #[serde(default)]
    #[validate(nested)]
    pub mcp: McpServerConfig,

    /// REST front end settings
    #[serde(default)]
    #[validate(nested)]
    pub rest: RestServerConfig,

    /// Safety policy settings
    #[serde(default)]
    pub safety: SafetyConfig,
}

/// Account and endpoint for the external notes service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct KeepConfig {
    /// Account email
    #[validate(email)]
    pub email: String,

    /// Master token credential
    #[validate(length(min = 1))]
    pub master_token: String,

    /// Base URL of the Keep gateway
    #[validate(url)]
    pub api_url: String,

    /// Per-request timeout for the external client
    #[validate(range(min = 1, max = 300))]
    pub timeout_seconds: u64,
}

impl Default for KeepConfig {
    fn default() -> Self {
        Self {
            email: String::new(),
            master_token: String::new(),
            api_url: "http://127.0.0.1:8100".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Transport the MCP front end speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum McpTransport {
    /// WebSocket endpoint on the configured bind address
    #[default]
    Ws,
    /// Newline-delimited JSON-RPC on stdin/stdout
    Stdio,
}

impl std::str::FromStr for McpTransport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ws" => Ok(Self::Ws),
            "stdio" => Ok(Self::Stdio),
            other => Err(format!("unknown transport '{other}', expected ws or stdio")),
        }
    }
}

impl std::fmt::Display for McpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ws => write!(f, "ws"),
            Self::Stdio => write!(f, "stdio"),
        }
    }
}

/// MCP front end settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct McpServerConfig {
    /// Host to bind the server to
    #[validate(length(min = 1, max = 255))]
    pub host: String,

    /// Port to bind the server to
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    /// WebSocket endpoint path
    #[validate(length(min = 1, max = 255))]
    pub path: String,

    /// Transport to serve
    pub transport: McpTransport,

    /// Per-call dispatch timeout
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_seconds: u64,
}

impl Default for McpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            path: "/mcp".to_string(),
            transport: McpTransport::Ws,
            request_timeout_seconds: 30,
        }
    }
}

/// REST front end settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct RestServerConfig {
    /// Host to bind the server to
    #[validate(length(min = 1, max = 255))]
    pub host: String,

    /// Port to bind the server to
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,
}

impl Default for RestServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
        }
    }
}

/// Safety policy settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SafetyConfig {
    /// When true, the managed-marker check is skipped entirely
    #[serde(default)]
    pub unsafe_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.keep.api_url, "http://127.0.0.1:8100");
        assert_eq!(config.keep.timeout_seconds, 30);
        assert_eq!(config.mcp.host, "0.0.0.0");
        assert_eq!(config.mcp.port, 8000);
        assert_eq!(config.mcp.path, "/mcp");
        assert_eq!(config.mcp.transport, McpTransport::Ws);
        assert_eq!(config.rest.port, 8001);
        assert!(!config.safety.unsafe_mode);
    }

    #[test]
    fn test_keep_config_validation() {
        let keep = KeepConfig {
            email: "user@example.com".to_string(),
            master_token: "aas_et/token".to_string(),
            ..Default::default()
        };
        assert!(keep.validate().is_ok());

        let bad_email = KeepConfig {
            email: "not-an-email".to_string(),
            master_token: "t".to_string(),
            ..Default::default()
        };
        assert!(bad_email.validate().is_err());

        let bad_url = KeepConfig {
            email: "user@example.com".to_string(),
            master_token: "t".to_string(),
            api_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_transport_from_str() {
        use std::str::FromStr;
        assert_eq!(McpTransport::from_str("ws").unwrap(), McpTransport::Ws);
        assert_eq!(McpTransport::from_str("WS").unwrap(), McpTransport::Ws);
        assert_eq!(
            McpTransport::from_str("stdio").unwrap(),
            McpTransport::Stdio
        );
        assert!(McpTransport::from_str("http").is_err());
    }

    #[test]
    fn test_transport_display() {
        assert_eq!(McpTransport::Ws.to_string(), "ws");
        assert_eq!(McpTransport::Stdio.to_string(), "stdio");
    }
}
