//! HTTP Server Configuration
//!
//! Configuration for the MCP JSON-RPC over HTTP transport.

use crate::error::ProviderError;
use std::net::SocketAddr;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_SESSIONS: usize = 50;

/// HTTP server configuration
///
/// ## Environment Variables
///
/// - `HTTP_HOST`: Server bind address (default: 127.0.0.1)
/// - `HTTP_PORT`: Server port (default: 3000)
/// - `HTTP_MAX_SESSIONS`: Max concurrent MCP sessions (default: 50)
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Server bind address
    pub addr: SocketAddr,

    /// Maximum concurrent sessions
    pub max_sessions: usize,
}

impl HttpConfig {
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HTTP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port: u16 = parse_var(&lookup, "HTTP_PORT", DEFAULT_PORT)?;
        let max_sessions: usize = parse_var(&lookup, "HTTP_MAX_SESSIONS", DEFAULT_MAX_SESSIONS)?;

        let addr = format!("{}:{}", host, port).parse().map_err(|e| {
            ProviderError::Configuration(format!("Invalid bind address {host}:{port}: {e}"))
        })?;

        Ok(Self { addr, max_sessions })
    }

    /// Replaces the port, keeping the bind host
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr.set_port(port);
        self
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ProviderError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ProviderError::Configuration(format!("{name} is invalid: {raw:?}"))),
        None => Ok(default),
    }
}
