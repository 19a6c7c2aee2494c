//! MCP transport layer
//!
//! - Stdio: standard I/O for local MCP clients (rmcp)
//! - HTTP: JSON-RPC 2.0 over HTTP with session management (axum)

#[cfg(feature = "http_transport")]
pub mod http;

#[cfg(feature = "mcp_server")]
pub mod stdio;

use std::fmt;
use std::str::FromStr;

/// Transport mode selection for the MCP server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMode {
    /// Standard I/O transport (local MCP connections)
    #[default]
    Stdio,

    /// JSON-RPC over HTTP
    Http,
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdio" => Ok(Self::Stdio),
            "http" => Ok(Self::Http),
            other => Err(format!("Invalid mode: {}", other)),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => f.write_str("stdio"),
            Self::Http => f.write_str("http"),
        }
    }
}
