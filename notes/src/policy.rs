//! The label gate deciding which mutations may proceed.

use errors::NotesError;
use kp_core::types::{MANAGED_LABEL, Note, NoteOperation};

/// Safety policy for mutations against the external note store.
///
/// A pure decision function: given an operation and the target note, answer
/// allowed or denied. Denial is a typed client-facing outcome
/// ([`NotesError::ReadOnly`]), never a fault. The policy holds no mutable
/// state; it is built once from configuration and copied freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyPolicy {
    unsafe_mode: bool,
}

impl SafetyPolicy {
    pub fn new(unsafe_mode: bool) -> Self {
        Self { unsafe_mode }
    }

    pub fn unsafe_mode(&self) -> bool {
        self.unsafe_mode
    }

    /// Decide whether `operation` may proceed against `note`.
    ///
    /// Rules, in order:
    /// - unsafe mode on: everything is allowed
    /// - reads and `create` are always allowed (`create` never has a target
    ///   note; the request mapper attaches the managed marker to the draft)
    /// - `update`/`delete` require the target note to carry the managed
    ///   marker
    pub fn authorize(&self, operation: NoteOperation, note: Option<&Note>) -> Result<(), NotesError> {
        if self.unsafe_mode {
            return Ok(());
        }

        match operation {
            NoteOperation::List
            | NoteOperation::Search
            | NoteOperation::Get
            | NoteOperation::Create => Ok(()),
            NoteOperation::Update | NoteOperation::Delete => match note {
                Some(note) if note.is_managed() => Ok(()),
                Some(note) => Err(NotesError::ReadOnly {
                    id: note.id.to_string(),
                    label: MANAGED_LABEL.to_string(),
                }),
                // A mutation with no note to inspect cannot prove the marker.
                None => Err(NotesError::ReadOnly {
                    id: "unknown".to_string(),
                    label: MANAGED_LABEL.to_string(),
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kp_core::types::{NoteColor, NoteId};

    fn note_with_labels(labels: &[&str]) -> Note {
        Note {
            id: NoteId::new("n1").unwrap(),
            title: Some("title".to_string()),
            text: Some("text".to_string()),
            pinned: false,
            color: NoteColor::Default,
            labels: labels.iter().map(|l| (*l).to_string()).collect(),
        }
    }

    #[test]
    fn test_reads_always_allowed() {
        let policy = SafetyPolicy::new(false);
        let unmanaged = note_with_labels(&[]);

        for op in [NoteOperation::List, NoteOperation::Search, NoteOperation::Get] {
            assert!(policy.authorize(op, None).is_ok());
            assert!(policy.authorize(op, Some(&unmanaged)).is_ok());
        }
    }

    #[test]
    fn test_create_always_allowed() {
        assert!(
            SafetyPolicy::new(false)
                .authorize(NoteOperation::Create, None)
                .is_ok()
        );
    }

    #[test]
    fn test_mutation_denied_without_marker() {
        let policy = SafetyPolicy::new(false);
        let unmanaged = note_with_labels(&["groceries"]);

        for op in [NoteOperation::Update, NoteOperation::Delete] {
            let err = policy.authorize(op, Some(&unmanaged)).unwrap_err();
            assert!(matches!(err, NotesError::ReadOnly { .. }));
            assert!(err.to_string().contains("keep-mcp"));
            assert!(err.to_string().contains("n1"));
        }
    }

    #[test]
    fn test_mutation_allowed_with_marker() {
        let policy = SafetyPolicy::new(false);
        let managed = note_with_labels(&["groceries", MANAGED_LABEL]);

        assert!(policy.authorize(NoteOperation::Update, Some(&managed)).is_ok());
        assert!(policy.authorize(NoteOperation::Delete, Some(&managed)).is_ok());
    }

    #[test]
    fn test_unsafe_mode_allows_everything() {
        let policy = SafetyPolicy::new(true);
        let unmanaged = note_with_labels(&[]);

        assert!(policy.authorize(NoteOperation::Update, Some(&unmanaged)).is_ok());
        assert!(policy.authorize(NoteOperation::Delete, Some(&unmanaged)).is_ok());
        assert!(policy.authorize(NoteOperation::Delete, None).is_ok());
    }

    #[test]
    fn test_mutation_without_note_denied() {
        let policy = SafetyPolicy::new(false);
        assert!(policy.authorize(NoteOperation::Delete, None).is_err());
        assert!(policy.authorize(NoteOperation::Update, None).is_err());
    }
}
