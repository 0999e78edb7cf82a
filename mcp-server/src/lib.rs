//! # Keep MCP Server
//!
//! This crate provides the MCP front end for the Keep bridge: the six note
//! tools served over JSON-RPC 2.0 with a choice of transports.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  ws / stdio  ┌─────────────────┐   HTTP   ┌──────────────┐
//! │  MCP client  │─────────────►│ keep-mcp-server │─────────►│ Keep gateway │
//! │ (agent, IDE) │              │   (this crate)  │          │              │
//! └──────────────┘              └─────────────────┘          └──────────────┘
//! ```
//!
//! ## Endpoints (ws transport)
//!
//! - `GET /mcp` (configurable) - WebSocket upgrade, one JSON-RPC message per
//!   text frame
//! - `GET /health`, `GET /api/health` - Health check endpoints
//!
//! The stdio transport reads newline-delimited JSON-RPC from stdin and
//! writes responses to stdout, one line per response.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod stdio;
pub mod ws;

pub use error::McpServerError;
pub use server::KeepMcpServer;
pub use state::AppState;
