//! # Configuration System
//!
//! Process configuration for the Keep bridge.
//!
//! This crate provides:
//! - Configuration structures for the external client and both front ends
//! - Environment variable loading (12-factor app principles)
//! - Configuration validation
//!
//! Configuration is constructed once at startup and passed down explicitly;
//! nothing reads the environment after that.

pub mod config;
pub mod loader;

pub use config::{AppConfig, KeepConfig, McpServerConfig, McpTransport, RestServerConfig, SafetyConfig};
pub use loader::load_from_env;
pub use validator::Validate;
