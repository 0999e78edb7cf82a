//! # MCP Tools Interface
//!
//! The six Keep tools and the JSON-RPC 2.0 dispatcher behind the MCP front
//! end. Transports live in the `mcp-server` binary; everything here is
//! transport-agnostic.

pub mod keep;
pub mod server;
pub mod tools;
