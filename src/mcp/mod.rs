//! Model Context Protocol (MCP) server implementation
//!
//! Exposes the Binance tool registry through the rmcp SDK. Tool listing and
//! invocation are delegated to [`crate::tools::ToolDispatcher`].

pub mod handler;
pub mod server;

// Re-exports
pub use server::BinanceServer;
