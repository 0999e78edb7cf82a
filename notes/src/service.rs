//! Request mapping and orchestration for the six note operations.

use crate::policy::SafetyPolicy;
use crate::shape::{DeleteReceipt, NoteCollection};
use errors::NotesError;
use kp_core::traits::KeepClient;
use kp_core::types::{MANAGED_LABEL, Note, NoteDraft, NoteId, NoteOperation, NotePatch};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// The shared pipeline both front ends call into.
///
/// Validates the inbound request, consults the [`SafetyPolicy`], delegates to
/// the external client, and shapes the result. Holds no note state of its
/// own; every call is an independent round trip to the external service.
pub struct NotesService {
    client: Arc<dyn KeepClient>,
    policy: SafetyPolicy,
}

impl NotesService {
    pub fn new(client: Arc<dyn KeepClient>, policy: SafetyPolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> &SafetyPolicy {
        &self.policy
    }

    /// All notes in the account.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<NoteCollection, NotesError> {
        let notes = self.client.list().await?;
        debug!(count = notes.len(), "Listed notes");
        Ok(NoteCollection::new(notes))
    }

    /// Notes matching `query`, with the external service's own match
    /// semantics. The query must not be empty or whitespace-only; it is
    /// passed upstream verbatim.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<NoteCollection, NotesError> {
        if query.trim().is_empty() {
            return Err(NotesError::InvalidInput {
                field: "query".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let notes = self.client.search(query).await?;
        debug!(count = notes.len(), "Search complete");
        Ok(NoteCollection::new(notes))
    }

    /// One note by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Note, NotesError> {
        let id = parse_id(id)?;
        self.fetch(&id).await
    }

    /// Create a note. Both fields are optional; an empty note is accepted.
    /// The managed marker is attached to the draft before it goes upstream,
    /// so every note created here is mutable through this system.
    #[instrument(skip(self, title, text))]
    pub async fn create(
        &self,
        title: Option<String>,
        text: Option<String>,
    ) -> Result<Note, NotesError> {
        self.policy.authorize(NoteOperation::Create, None)?;

        let draft = NoteDraft::new(title, text).with_label(MANAGED_LABEL);
        let note = self.client.create(draft).await?;
        info!(id = %note.id, "Created note");
        Ok(note)
    }

    /// Partial update: only the fields present in `patch` change. The note
    /// is fetched first so the policy can inspect its labels.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: NotePatch) -> Result<Note, NotesError> {
        let id = parse_id(id)?;
        let note = self.fetch(&id).await?;
        self.authorize(NoteOperation::Update, &note)?;

        let updated = self.client.update(&id, patch).await?;
        info!(id = %id, "Updated note");
        Ok(updated)
    }

    /// Delete a note, policy permitting.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<DeleteReceipt, NotesError> {
        let id = parse_id(id)?;
        let note = self.fetch(&id).await?;
        self.authorize(NoteOperation::Delete, &note)?;

        self.client.delete(&id).await?;
        info!(id = %id, "Deleted note");
        Ok(DeleteReceipt::new(&id))
    }

    /// Probe the external client, for health endpoints.
    pub async fn ping(&self) -> Result<(), NotesError> {
        Ok(self.client.ping().await?)
    }

    async fn fetch(&self, id: &NoteId) -> Result<Note, NotesError> {
        self.client
            .get(id)
            .await?
            .ok_or_else(|| NotesError::NotFound { id: id.to_string() })
    }

    fn authorize(&self, operation: NoteOperation, note: &Note) -> Result<(), NotesError> {
        if let Err(e) = self.policy.authorize(operation, Some(note)) {
            debug!(id = %note.id, %operation, "Mutation denied by safety policy");
            return Err(e);
        }
        Ok(())
    }
}

fn parse_id(id: &str) -> Result<NoteId, NotesError> {
    NoteId::new(id).ok_or_else(|| NotesError::InvalidInput {
        field: "noteId".to_string(),
        reason: "must not be empty".to_string(),
    })
}
