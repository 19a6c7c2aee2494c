// Library exports for binance-mcp

pub mod error;

// Binance API integration modules
pub mod binance; // Binance API client
pub mod config; // Configuration management

pub mod tools; // Tool registry and dispatcher
pub mod transport; // MCP transport layer (stdio, HTTP)

#[cfg(feature = "mcp_server")]
pub mod mcp; // MCP server implementation
