//! MCP server for the collaborator form.
//!
//! This module provides the MCP protocol server that exposes validation,
//! masking and record operations to AI assistants through the Model Context
//! Protocol.

pub mod handlers;

pub use handlers::CollaboratorMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the collaborator MCP server with stdio transport.
///
/// Communicates via stdin/stdout using the MCP protocol and returns once
/// the client disconnects.
pub async fn run_server(server: CollaboratorMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
