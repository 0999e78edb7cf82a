//! # Keep REST API
//!
//! This crate provides the REST front end for the Keep bridge: the six note
//! operations over plain HTTP, for scripts and services that do not speak
//! MCP.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    HTTP    ┌───────────────┐    HTTP    ┌──────────────┐
//! │ HTTP client  │───────────►│ keep-rest-api │───────────►│ Keep gateway │
//! │ (curl, apps) │            │  (this crate) │            │              │
//! └──────────────┘            └───────────────┘            └──────────────┘
//! ```
//!
//! ## Endpoints
//!
//! - `GET /` - Service information and endpoint map
//! - `GET /health`, `GET /api/health` - Health check endpoints
//! - `GET /openapi.json` - Generated OpenAPI document
//! - `GET /api/notes` - List notes
//! - `GET /api/notes/search?query=...` - Search notes
//! - `GET /api/notes/{note_id}` - Fetch one note
//! - `POST /api/notes` - Create a note
//! - `PUT /api/notes/{note_id}` - Update a note
//! - `DELETE /api/notes/{note_id}` - Delete a note

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, RestServerError};
pub use server::KeepRestServer;
pub use state::AppState;
