//! Output shapes returned to both front ends.
//!
//! A single note serializes as the [`Note`] type itself; these wrappers cover
//! the collection and deletion cases. Shaping is pure serialization, so the
//! same types back the REST bodies and the MCP tool results.

use kp_core::types::{Note, NoteId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Collection wrapper for `list` and `search` results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct NoteCollection {
    pub notes: Vec<Note>,
    pub count: usize,
}

impl NoteCollection {
    pub fn new(notes: Vec<Note>) -> Self {
        let count = notes.len();
        Self { notes, count }
    }
}

/// Receipt returned after a successful `delete`.
///
/// The id rides alongside the human-readable message so callers never have
/// to parse it back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct DeleteReceipt {
    pub id: NoteId,
    pub message: String,
    pub status: String,
}

impl DeleteReceipt {
    pub fn new(id: &NoteId) -> Self {
        Self {
            id: id.clone(),
            message: format!("Note {id} marked for deletion"),
            status: "success".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kp_core::types::NoteColor;

    #[test]
    fn test_collection_counts_notes() {
        let notes = vec![
            Note {
                id: NoteId::new("a").unwrap(),
                title: None,
                text: None,
                pinned: false,
                color: NoteColor::Default,
                labels: vec![],
            },
            Note {
                id: NoteId::new("b").unwrap(),
                title: Some("t".to_string()),
                text: None,
                pinned: true,
                color: NoteColor::Blue,
                labels: vec!["keep-mcp".to_string()],
            },
        ];

        let collection = NoteCollection::new(notes);
        assert_eq!(collection.count, 2);

        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["notes"].as_array().unwrap().len(), 2);
        assert_eq!(json["notes"][1]["color"], "BLUE");
    }

    #[test]
    fn test_empty_collection() {
        let collection = NoteCollection::new(Vec::new());
        assert_eq!(collection.count, 0);
        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["count"], 0);
    }

    #[test]
    fn test_delete_receipt_shape() {
        let receipt = DeleteReceipt::new(&NoteId::new("n7").unwrap());
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["id"], "n7");
        assert_eq!(json["message"], "Note n7 marked for deletion");
        assert_eq!(json["status"], "success");
    }
}
