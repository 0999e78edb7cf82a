//! The six Keep tools exposed over MCP.
//!
//! Each tool is a thin adapter: deserialize and validate the arguments,
//! delegate to the shared [`NotesService`], serialize the result. Argument
//! and result shapes mirror the REST surface exactly.

use crate::tools::Tool;
use async_trait::async_trait;
use kp_core::types::NotePatch;
use notes::NotesService;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use validator::Validate;

pub struct KeepListTool {
    service: Arc<NotesService>,
}

impl KeepListTool {
    pub fn new(service: Arc<NotesService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for KeepListTool {
    fn name(&self) -> &str {
        "keep_list"
    }

    fn description(&self) -> &str {
        "List all notes in the Google Keep account (non-archived, non-trashed)."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn call(&self, _params: Value) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let collection = self.service.list().await?;
        Ok(serde_json::to_value(collection)?)
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Validate)]
pub struct KeepSearchParams {
    #[validate(length(min = 1))]
    pub query: String,
}

pub struct KeepSearchTool {
    service: Arc<NotesService>,
}

impl KeepSearchTool {
    pub fn new(service: Arc<NotesService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for KeepSearchTool {
    fn name(&self) -> &str {
        "keep_search"
    }

    fn description(&self) -> &str {
        "Search notes by text. Match semantics are Google Keep's own."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Text to search for" }
            },
            "required": ["query"]
        })
    }

    async fn call(&self, params: Value) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let p: KeepSearchParams = serde_json::from_value(params)?;
        p.validate()?;

        let collection = self.service.search(&p.query).await?;
        Ok(serde_json::to_value(collection)?)
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Validate)]
pub struct KeepGetParams {
    #[serde(rename = "noteId")]
    #[validate(length(min = 1))]
    pub note_id: String,
}

pub struct KeepGetTool {
    service: Arc<NotesService>,
}

impl KeepGetTool {
    pub fn new(service: Arc<NotesService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for KeepGetTool {
    fn name(&self) -> &str {
        "keep_get"
    }

    fn description(&self) -> &str {
        "Fetch a single note by its Keep-assigned ID."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "noteId": { "type": "string", "description": "ID of the note" }
            },
            "required": ["noteId"]
        })
    }

    async fn call(&self, params: Value) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let p: KeepGetParams = serde_json::from_value(params)?;
        p.validate()?;

        let note = self.service.get(&p.note_id).await?;
        Ok(serde_json::to_value(note)?)
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Validate)]
pub struct KeepCreateParams {
    pub title: Option<String>,
    pub text: Option<String>,
}

pub struct KeepCreateTool {
    service: Arc<NotesService>,
}

impl KeepCreateTool {
    pub fn new(service: Arc<NotesService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for KeepCreateTool {
    fn name(&self) -> &str {
        "keep_create"
    }

    fn description(&self) -> &str {
        "Create a note. The keep-mcp label is attached so the note stays mutable through this server."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": { "type": "string", "description": "Note title" },
                "text": { "type": "string", "description": "Note body" }
            }
        })
    }

    async fn call(&self, params: Value) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let p: KeepCreateParams = serde_json::from_value(params)?;
        p.validate()?;

        let note = self.service.create(p.title, p.text).await?;
        Ok(serde_json::to_value(note)?)
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Validate)]
pub struct KeepUpdateParams {
    #[serde(rename = "noteId")]
    #[validate(length(min = 1))]
    pub note_id: String,
    pub title: Option<String>,
    pub text: Option<String>,
}

pub struct KeepUpdateTool {
    service: Arc<NotesService>,
}

impl KeepUpdateTool {
    pub fn new(service: Arc<NotesService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for KeepUpdateTool {
    fn name(&self) -> &str {
        "keep_update"
    }

    fn description(&self) -> &str {
        "Update a note's title and/or text. Only provided fields change. Requires the keep-mcp label unless unsafe mode is enabled."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "noteId": { "type": "string", "description": "ID of the note to update" },
                "title": { "type": "string", "description": "New title" },
                "text": { "type": "string", "description": "New body" }
            },
            "required": ["noteId"]
        })
    }

    async fn call(&self, params: Value) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let p: KeepUpdateParams = serde_json::from_value(params)?;
        p.validate()?;

        let patch = NotePatch {
            title: p.title,
            text: p.text,
        };
        let note = self.service.update(&p.note_id, patch).await?;
        Ok(serde_json::to_value(note)?)
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Validate)]
pub struct KeepDeleteParams {
    #[serde(rename = "noteId")]
    #[validate(length(min = 1))]
    pub note_id: String,
}

pub struct KeepDeleteTool {
    service: Arc<NotesService>,
}

impl KeepDeleteTool {
    pub fn new(service: Arc<NotesService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for KeepDeleteTool {
    fn name(&self) -> &str {
        "keep_delete"
    }

    fn description(&self) -> &str {
        "Mark a note for deletion. Requires the keep-mcp label unless unsafe mode is enabled."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "noteId": { "type": "string", "description": "ID of the note to delete" }
            },
            "required": ["noteId"]
        })
    }

    async fn call(&self, params: Value) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let p: KeepDeleteParams = serde_json::from_value(params)?;
        p.validate()?;

        let receipt = self.service.delete(&p.note_id).await?;
        Ok(serde_json::to_value(receipt)?)
    }
}
