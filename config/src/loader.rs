//! # Environment Variable Loader
//!
//! Loads configuration from environment variables following 12-factor app
//! principles.
//!
//! # Naming Convention
//! - `GOOGLE_*`: external account credentials
//! - `KEEP_API_*`: Keep gateway endpoint settings
//! - `MCP_*`: MCP front end settings
//! - `REST_API_*`: REST front end settings
//! - `UNSAFE_MODE`: safety toggle

use crate::config::{AppConfig, KeepConfig, McpServerConfig, RestServerConfig, SafetyConfig};
use errors::ConfigError;
use std::env;
use validator::Validate;

/// Load configuration from environment variables.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Builds the full [`AppConfig`] from the process environment, applying
/// defaults for everything except the account credentials, then validates
/// the result. Called once at startup; loading never happens again after
/// that.
///
/// ## Environment Variables
/// ### Account (required)
/// - `GOOGLE_EMAIL`: account email for the external service
/// - `GOOGLE_MASTER_TOKEN`: master token credential
///
/// ### Keep gateway (`KEEP_API_*`)
/// - `KEEP_API_URL`: gateway base URL (default: "http://127.0.0.1:8100")
/// - `KEEP_API_TIMEOUT_SECS`: per-request timeout in seconds (default: 30)
///
/// ### MCP front end (`MCP_*`)
/// - `MCP_HOST`: bind host (default: "0.0.0.0")
/// - `MCP_PORT`: bind port (default: 8000)
/// - `MCP_PATH`: WebSocket endpoint path (default: "/mcp")
/// - `MCP_TRANSPORT`: "ws" or "stdio" (default: "ws")
/// - `MCP_REQUEST_TIMEOUT_SECS`: per-call dispatch timeout (default: 30)
///
/// ### REST front end (`REST_API_*`)
/// - `REST_API_HOST`: bind host (default: "0.0.0.0")
/// - `REST_API_PORT`: bind port (default: 8001)
///
/// ### Safety
/// - `UNSAFE_MODE`: "true"/"1" (case-insensitive) disables the
///   managed-marker check (default: off)
pub fn load_from_env() -> Result<AppConfig, ConfigError> {
    let config = AppConfig {
        keep: load_keep_from_env()?,
        mcp: load_mcp_from_env()?,
        rest: load_rest_from_env()?,
        safety: load_safety_from_env(),
    };

    config.validate().map_err(|e| ConfigError::Invalid {
        key: "config".to_string(),
        reason: e.to_string(),
    })?;

    Ok(config)
}

fn load_keep_from_env() -> Result<KeepConfig, ConfigError> {
    Ok(KeepConfig {
        email: require("GOOGLE_EMAIL")?,
        master_token: require("GOOGLE_MASTER_TOKEN")?,
        api_url: env::var("KEEP_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8100".to_string()),
        timeout_seconds: parse_env("KEEP_API_TIMEOUT_SECS")?.unwrap_or(30),
    })
}

fn load_mcp_from_env() -> Result<McpServerConfig, ConfigError> {
    Ok(McpServerConfig {
        host: env::var("MCP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        port: parse_env("MCP_PORT")?.unwrap_or(8000),
        path: env::var("MCP_PATH").unwrap_or_else(|_| "/mcp".to_string()),
        transport: parse_env("MCP_TRANSPORT")?.unwrap_or_default(),
        request_timeout_seconds: parse_env("MCP_REQUEST_TIMEOUT_SECS")?.unwrap_or(30),
    })
}

fn load_rest_from_env() -> Result<RestServerConfig, ConfigError> {
    Ok(RestServerConfig {
        host: env::var("REST_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        port: parse_env("REST_API_PORT")?.unwrap_or(8001),
    })
}

fn load_safety_from_env() -> SafetyConfig {
    SafetyConfig {
        unsafe_mode: parse_bool_env("UNSAFE_MODE"),
    }
}

fn require(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing {
        key: key.to_string(),
    })
}

/// Absent variables yield `None`; present-but-unparseable values are an
/// error rather than silently falling back to the default.
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(s) => s.parse::<T>().map(Some).map_err(|e| ConfigError::Invalid {
            key: key.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(None),
    }
}

fn parse_bool_env(key: &str) -> bool {
    env::var(key)
        .map(|v| {
            let v = v.to_ascii_lowercase();
            v == "true" || v == "1"
        })
        .unwrap_or(false)
}
