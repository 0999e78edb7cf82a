//! WebSocket transport for the MCP front end.
//!
//! Each connection is an independent JSON-RPC session carrying one message
//! per text frame. Protocol handling lives in [`tools::server::McpServer`];
//! this module only moves frames.

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// WebSocket upgrade handler.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handles an individual client connection.
///
/// Runs until the client disconnects. Notifications produce no reply frame,
/// so a received frame yields at most one outbound frame.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    info!("MCP client connected");

    let (mut sender, mut receiver) = socket.split();

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => {
                if let Some(reply) = state.mcp.handle_message(&text).await {
                    if let Err(e) = sender.send(Message::Text(reply.into())).await {
                        warn!(error = %e, "Failed to send response, closing connection");
                        break;
                    }
                }
            }
            Ok(Message::Close(_)) => {
                debug!("Client sent close frame");
                break;
            }
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                // Pong is handled by axum
            }
            Ok(Message::Binary(data)) => {
                debug!(len = data.len(), "Binary frame ignored");
            }
            Err(e) => {
                warn!(error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    info!("MCP client disconnected");
}
