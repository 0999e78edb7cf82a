use crate::keep::{
    KeepCreateTool, KeepDeleteTool, KeepGetTool, KeepListTool, KeepSearchTool, KeepUpdateTool,
};
use crate::tools::{ToolDefinition, ToolRegistry};
use errors::NotesError;
use notes::NotesService;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Span, debug, error, info, instrument};

use tokio::time::timeout;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "keep-mcp";

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// Absent on notifications; JSON-RPC requests always carry one.
    #[serde(default)]
    pub id: Value,
    pub method: String,
    pub params: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            code: -32700,
            message: message.into(),
            data: None,
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
            data: None,
        }
    }

    pub fn method_not_found(message: impl Into<String>) -> Self {
        Self {
            code: -32601,
            message: message.into(),
            data: None,
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            code: -32000,
            message: message.into(),
            data: None,
        }
    }

    pub fn request_timeout(message: impl Into<String>) -> Self {
        Self {
            code: -32001,
            message: message.into(),
            data: None,
        }
    }

    pub fn note_not_found(message: impl Into<String>) -> Self {
        Self {
            code: -32002,
            message: message.into(),
            data: None,
        }
    }

    pub fn read_only(message: impl Into<String>) -> Self {
        Self {
            code: -32003,
            message: message.into(),
            data: None,
        }
    }
}

/// MCP JSON-RPC server for the Keep tools.
///
/// Handles tool discovery and execution with integrated timeouts and
/// tracing. Transport-agnostic: the WebSocket and stdio front ends both feed
/// messages through [`McpServer::handle_message`].
pub struct McpServer {
    registry: ToolRegistry,
    timeout_duration: Duration,
}

impl McpServer {
    /// Creates a new McpServer with the six Keep tools registered.
    pub fn new(service: Arc<NotesService>) -> Self {
        let mut registry = ToolRegistry::new();

        registry.register(Box::new(KeepListTool::new(service.clone())));
        registry.register(Box::new(KeepSearchTool::new(service.clone())));
        registry.register(Box::new(KeepGetTool::new(service.clone())));
        registry.register(Box::new(KeepCreateTool::new(service.clone())));
        registry.register(Box::new(KeepUpdateTool::new(service.clone())));
        registry.register(Box::new(KeepDeleteTool::new(service)));

        Self {
            registry,
            timeout_duration: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout_duration = duration;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.registry.list_tools()
    }

    /// One raw JSON-RPC message in, at most one out.
    ///
    /// Returns `None` when the message was a notification (no response is
    /// due). Unparseable input yields a `-32700` response with a null id.
    pub async fn handle_message(&self, text: &str) -> Option<String> {
        let request: JsonRpcRequest = match serde_json::from_str(text) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "Unparseable JSON-RPC message");
                let response = JsonRpcResponse {
                    jsonrpc: "2.0".to_string(),
                    id: Value::Null,
                    result: None,
                    error: Some(JsonRpcError::parse_error(format!("Parse error: {e}"))),
                };
                return serde_json::to_string(&response).ok();
            }
        };

        let response = self.handle_request(request).await?;
        serde_json::to_string(&response).ok()
    }

    #[instrument(skip(self, request), fields(method = %request.method, request_id = ?request.id))]
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "Handling JSON-RPC request");

        // Notifications carry no id and get no response.
        if request.method.starts_with("notifications/") {
            debug!(method = %request.method, "Notification consumed");
            return None;
        }

        let request_id = request.id.clone();
        let result = timeout(self.timeout_duration, self.dispatch(request)).await;

        match result {
            Ok(response) => Some(response),
            Err(_) => {
                error!("Request timed out");
                Some(JsonRpcResponse {
                    jsonrpc: "2.0".to_string(),
                    id: request_id,
                    result: None,
                    error: Some(JsonRpcError::request_timeout("Request timed out")),
                })
            }
        }
    }

    async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: request.id,
                result: Some(serde_json::json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {
                        "tools": {}
                    },
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": env!("CARGO_PKG_VERSION")
                    }
                })),
                error: None,
            },
            "tools/list" => {
                let tools = self.registry.list_tools();
                JsonRpcResponse {
                    jsonrpc: "2.0".to_string(),
                    id: request.id,
                    result: Some(serde_json::json!({ "tools": tools })),
                    error: None,
                }
            }
            "tools/call" => {
                let params = match request.params {
                    Some(p) => p,
                    None => {
                        return JsonRpcResponse {
                            jsonrpc: "2.0".to_string(),
                            id: request.id,
                            result: None,
                            error: Some(JsonRpcError::invalid_params("Invalid params")),
                        };
                    }
                };

                let name = match params["name"].as_str() {
                    Some(n) => n,
                    None => {
                        return JsonRpcResponse {
                            jsonrpc: "2.0".to_string(),
                            id: request.id,
                            result: None,
                            error: Some(JsonRpcError::invalid_params("Missing tool name")),
                        };
                    }
                };

                Span::current().record("tool_name", name);
                info!(tool = %name, "Calling tool");

                let tool_params = params
                    .get("arguments")
                    .cloned()
                    .unwrap_or_else(|| serde_json::json!({}));

                match self.registry.call(name, tool_params).await {
                    Ok(result) => {
                        info!(tool = %name, "Tool call successful");
                        JsonRpcResponse {
                            jsonrpc: "2.0".to_string(),
                            id: request.id,
                            result: Some(result),
                            error: None,
                        }
                    }
                    Err(e) => {
                        let rpc_error = map_tool_error(&*e);
                        // Client-facing outcomes are expected traffic;
                        // everything else is a fault worth an error line.
                        if rpc_error.code == -32000 {
                            error!(tool = %name, error = %e, "Tool call failed");
                        } else {
                            debug!(tool = %name, error = %e, code = rpc_error.code, "Tool call rejected");
                        }

                        JsonRpcResponse {
                            jsonrpc: "2.0".to_string(),
                            id: request.id,
                            result: None,
                            error: Some(rpc_error),
                        }
                    }
                }
            }
            _ => {
                debug!(method = %request.method, "Method not found");
                JsonRpcResponse {
                    jsonrpc: "2.0".to_string(),
                    id: request.id,
                    result: None,
                    error: Some(JsonRpcError::method_not_found("Method not found")),
                }
            }
        }
    }
}

/// Map a tool failure onto the JSON-RPC error taxonomy.
///
/// [`NotesError`] carries the interesting cases; argument shape problems
/// (serde or validator) are invalid params, anything else is internal.
fn map_tool_error(e: &(dyn std::error::Error + Send + Sync + 'static)) -> JsonRpcError {
    if let Some(notes_error) = e.downcast_ref::<NotesError>() {
        return match notes_error {
            NotesError::InvalidInput { .. } => JsonRpcError::invalid_params(notes_error.to_string()),
            NotesError::NotFound { .. } => JsonRpcError::note_not_found(notes_error.to_string()),
            NotesError::ReadOnly { .. } => JsonRpcError::read_only(notes_error.to_string()),
            NotesError::Upstream(_) => JsonRpcError::internal_error(notes_error.to_string()),
        };
    }

    if e.is::<serde_json::Error>() || e.is::<validator::ValidationErrors>() {
        JsonRpcError::invalid_params(e.to_string())
    } else {
        JsonRpcError::internal_error(e.to_string())
    }
}
