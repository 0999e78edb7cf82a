//! # Keep Bridge Core
//!
//! Shared types and traits for the Keep bridge.
//!
//! This crate provides:
//! - The `Note` data model exchanged with the external notes service
//! - The `KeepClient` trait abstracting that service
//! - The managed-marker constant gating mutations

pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use traits::KeepClient;
pub use types::{MANAGED_LABEL, Note, NoteColor, NoteDraft, NoteId, NoteOperation, NotePatch};
