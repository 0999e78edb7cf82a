//! The seam between this system and the external notes service.

use crate::types::{Note, NoteDraft, NoteId, NotePatch};
use async_trait::async_trait;
use errors::KeepClientError;

/// Client for the external, account-bound notes service.
///
/// The external service's loosely-typed object model stays behind this trait;
/// everything above it works with the fixed `Note` shape. Implementations are
/// expected to be cheap to clone behind an `Arc` and safe to share across
/// requests.
#[async_trait]
pub trait KeepClient: Send + Sync {
    /// All notes in the account (non-archived, non-trashed).
    async fn list(&self) -> Result<Vec<Note>, KeepClientError>;

    /// Text search with whatever match semantics the external service
    /// defines. `query` is passed through verbatim.
    async fn search(&self, query: &str) -> Result<Vec<Note>, KeepClientError>;

    /// Fetch one note. `None` when the service has no note with this id.
    async fn get(&self, id: &NoteId) -> Result<Option<Note>, KeepClientError>;

    /// Create a note from the draft, labels included.
    async fn create(&self, draft: NoteDraft) -> Result<Note, KeepClientError>;

    /// Apply the patch and return the updated note.
    async fn update(&self, id: &NoteId, patch: NotePatch) -> Result<Note, KeepClientError>;

    /// Mark the note for deletion.
    async fn delete(&self, id: &NoteId) -> Result<(), KeepClientError>;

    /// Liveness probe against the service, used by health endpoints.
    async fn ping(&self) -> Result<(), KeepClientError>;
}
