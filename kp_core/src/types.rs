use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Reserved label attached to every note created through this system.
/// Mutations on notes lacking it are rejected unless unsafe mode is enabled.
pub const MANAGED_LABEL: &str = "keep-mcp";

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, JsonSchema, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// The external service assigns ids; we only require them to be non-blank.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() { None } else { Some(Self(id)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for NoteId {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string()).ok_or_else(|| anyhow::anyhow!("Invalid note ID"))
    }
}

/// Note colors as the external service names them on the wire.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    JsonSchema,
    EnumString,
    Display,
    Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NoteColor {
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Blue,
    Cerulean,
    Purple,
    Pink,
    Brown,
    Gray,
    // Unknown colors rolled out upstream decode as Default instead of
    // failing the whole note. serde requires the catch-all variant to be
    // declared last.
    #[default]
    #[serde(other)]
    Default,
}

/// A note as exchanged with the external service. Request-scoped only; this
/// system never stores notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub color: NoteColor,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Note {
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l == name)
    }

    /// Whether the managed marker is present. Label order is irrelevant.
    pub fn is_managed(&self) -> bool {
        self.has_label(MANAGED_LABEL)
    }
}

/// Payload for creating a note. The request mapper attaches the managed
/// marker before this reaches the external client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl NoteDraft {
    pub fn new(title: Option<String>, text: Option<String>) -> Self {
        Self {
            title,
            text,
            labels: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }
}

/// Partial update. Absent fields are omitted from the wire payload so the
/// external service leaves them unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.text.is_none()
    }
}

/// The six operations both front ends expose.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum NoteOperation {
    List,
    Search,
    Get,
    Create,
    Update,
    Delete,
}

impl NoteOperation {
    pub fn is_mutation(self) -> bool {
        matches!(self, Self::Create | Self::Update | Self::Delete)
    }
}
