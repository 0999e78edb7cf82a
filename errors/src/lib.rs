//! # Keep Bridge Errors
//!
//! Error taxonomy shared by both front ends.
//!
//! Four outcomes cover every request: bad input, no such note, a safety
//! policy denial, or an external-service failure. The first three are
//! client-facing and deliberate; only the last is a server-side fault, and it
//! carries the client-level cause for diagnostics.

use thiserror::Error;

/// Request-level errors surfaced by the notes service.
#[derive(Debug, Error)]
pub enum NotesError {
    /// Input failed validation before anything was sent upstream.
    #[error("Invalid input: {field} reason: {reason}")]
    InvalidInput { field: String, reason: String },

    /// The external service has no note with this id.
    #[error("Note with ID {id} not found")]
    NotFound { id: String },

    /// Safety policy denial. A typed outcome, not a fault: the note lacks
    /// the managed marker and unsafe mode is off.
    #[error("Note with ID {id} cannot be modified (missing {label} label and unsafe mode is not enabled)")]
    ReadOnly { id: String, label: String },

    /// The external client failed; the cause is preserved.
    #[error("Keep request failed: {0}")]
    Upstream(#[from] KeepClientError),
}

/// Failures from the external notes client itself.
#[derive(Debug, Error)]
pub enum KeepClientError {
    /// Connection-level failure: DNS, refused connection, timeout.
    #[error("Transport failure talking to the Keep API: {reason}")]
    Transport { reason: String },

    /// The Keep API answered with a non-success status.
    #[error("Keep API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("Could not decode Keep API response: {reason}")]
    Decode { reason: String },
}

/// Startup-only configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {key}")]
    Missing { key: String },

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}
