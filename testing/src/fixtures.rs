use async_trait::async_trait;
use errors::KeepClientError;
use kp_core::traits::KeepClient;
use kp_core::types::{MANAGED_LABEL, Note, NoteColor, NoteDraft, NoteId, NotePatch};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

pub fn unique_id(prefix: &str) -> String {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}", prefix, id)
}

pub fn unique_note_id() -> String {
    unique_id("test-note")
}

/// A note carrying the managed marker, mutable through the bridge.
pub fn managed_note(id: &str, title: &str, text: &str) -> Note {
    Note {
        id: NoteId::new(id).expect("fixture note id must be non-blank"),
        title: Some(title.to_string()),
        text: Some(text.to_string()),
        pinned: false,
        color: NoteColor::Default,
        labels: vec![MANAGED_LABEL.to_string()],
    }
}

/// A note without the managed marker, read-only under default policy.
pub fn unmanaged_note(id: &str, title: &str, text: &str) -> Note {
    Note {
        labels: Vec::new(),
        ..managed_note(id, title, text)
    }
}

/// In-memory stand-in for the external notes service.
///
/// Search is case-insensitive substring match over title and text, which is
/// close enough to the real service for pipeline tests. Flip
/// [`FakeKeepClient::set_unavailable`] to make every call fail with a
/// transport error, for exercising upstream-failure paths.
pub struct FakeKeepClient {
    notes: Mutex<Vec<Note>>,
    unavailable: AtomicBool,
}

impl FakeKeepClient {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    pub fn seeded(notes: Vec<Note>) -> Self {
        Self {
            notes: Mutex::new(notes),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of the stored notes, for assertions.
    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.lock().clone()
    }

    fn check_available(&self) -> Result<(), KeepClientError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(KeepClientError::Transport {
                reason: "keep gateway unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for FakeKeepClient {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_query(note: &Note, query: &str) -> bool {
    let query = query.to_lowercase();
    let title_hit = note
        .title
        .as_deref()
        .is_some_and(|t| t.to_lowercase().contains(&query));
    let text_hit = note
        .text
        .as_deref()
        .is_some_and(|t| t.to_lowercase().contains(&query));
    title_hit || text_hit
}

#[async_trait]
impl KeepClient for FakeKeepClient {
    async fn list(&self) -> Result<Vec<Note>, KeepClientError> {
        self.check_available()?;
        Ok(self.notes.lock().clone())
    }

    async fn search(&self, query: &str) -> Result<Vec<Note>, KeepClientError> {
        self.check_available()?;
        Ok(self
            .notes
            .lock()
            .iter()
            .filter(|n| matches_query(n, query))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &NoteId) -> Result<Option<Note>, KeepClientError> {
        self.check_available()?;
        Ok(self.notes.lock().iter().find(|n| &n.id == id).cloned())
    }

    async fn create(&self, draft: NoteDraft) -> Result<Note, KeepClientError> {
        self.check_available()?;
        let note = Note {
            id: NoteId::new(uuid::Uuid::new_v4().to_string())
                .expect("generated note id is non-blank"),
            title: draft.title,
            text: draft.text,
            pinned: false,
            color: NoteColor::Default,
            labels: draft.labels,
        };
        self.notes.lock().push(note.clone());
        Ok(note)
    }

    async fn update(&self, id: &NoteId, patch: NotePatch) -> Result<Note, KeepClientError> {
        self.check_available()?;
        let mut notes = self.notes.lock();
        let note = notes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| KeepClientError::Status {
                status: 404,
                body: format!("no note {id}"),
            })?;
        if let Some(title) = patch.title {
            note.title = Some(title);
        }
        if let Some(text) = patch.text {
            note.text = Some(text);
        }
        Ok(note.clone())
    }

    async fn delete(&self, id: &NoteId) -> Result<(), KeepClientError> {
        self.check_available()?;
        let mut notes = self.notes.lock();
        let before = notes.len();
        notes.retain(|n| &n.id != id);
        if notes.len() == before {
            return Err(KeepClientError::Status {
                status: 404,
                body: format!("no note {id}"),
            });
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), KeepClientError> {
        self.check_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unique_id_generation() {
        let id1 = unique_id("test");
        let id2 = unique_id("test");
        assert_ne!(id1, id2);
        assert!(id1.starts_with("test-"));
        assert!(id2.starts_with("test-"));
        assert!(unique_note_id().starts_with("test-note-"));
    }

    #[tokio::test]
    async fn test_unavailable_switch_fails_every_call() {
        let client = FakeKeepClient::seeded(vec![managed_note("n1", "t", "b")]);

        client.set_unavailable(true);
        assert!(matches!(
            client.list().await.unwrap_err(),
            KeepClientError::Transport { .. }
        ));
        assert!(client.ping().await.is_err());

        // Flipping back restores the seeded store untouched.
        client.set_unavailable(false);
        assert_eq!(client.list().await.unwrap().len(), 1);
        assert!(client.ping().await.is_ok());
    }
}
