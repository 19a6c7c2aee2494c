//! MCP Server Implementation
//!
//! This module contains the BinanceServer struct which implements the MCP
//! ServerHandler trait on top of the tool dispatcher.

use crate::tools::ToolDispatcher;

/// Main Binance MCP Server struct
#[derive(Clone, Debug)]
pub struct BinanceServer {
    /// Tool registry and router shared with every transport
    pub dispatcher: ToolDispatcher,
}

impl BinanceServer {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        Self { dispatcher }
    }
}
