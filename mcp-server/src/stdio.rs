//! Stdio transport for the MCP front end.
//!
//! Newline-delimited JSON-RPC on stdin/stdout for clients that spawn the
//! server as a subprocess. Stdout carries protocol frames only; the tracing
//! subscriber is pointed at stderr before this transport starts.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use crate::error::Result;
use tools::server::McpServer;

/// Reads requests line by line until stdin closes.
pub async fn run(mcp: Arc<McpServer>) -> Result<()> {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();
    let mut stdout = tokio::io::stdout();

    info!("MCP stdio transport ready");

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(reply) = mcp.handle_message(line).await {
            stdout.write_all(reply.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }

    info!("stdin closed, stdio transport stopping");
    Ok(())
}
