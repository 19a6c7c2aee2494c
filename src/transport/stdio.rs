//! Stdio Transport for MCP Server
//!
//! Provides standard I/O transport for local MCP connections (e.g., Claude Desktop).

use crate::mcp::BinanceServer;
use crate::tools::ToolDispatcher;
use rmcp::ServiceExt;

/// Runs the MCP server with stdio transport
///
/// Messages are read from stdin and responses are written to stdout.
/// Logging goes to stderr so it never interleaves with the protocol stream.
/// Returns when the client closes stdin.
pub async fn run_stdio_server(dispatcher: ToolDispatcher) -> anyhow::Result<()> {
    tracing::info!("Starting Binance MCP server in stdio mode");

    let server = BinanceServer::new(dispatcher);
    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!("MCP server ready on stdio");

    service.waiting().await?;

    tracing::info!("MCP server shutdown complete");

    Ok(())
}
