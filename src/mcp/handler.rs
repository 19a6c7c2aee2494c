//! MCP ServerHandler Implementation
//!
//! Converts the tool registry into rmcp tool listings and dispatcher
//! outcomes into `CallToolResult`s.

use crate::mcp::server::BinanceServer;
use crate::tools::ToolDescriptor;
use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorData, Implementation, InitializeResult,
    ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities, Tool,
    ToolsCapability,
};
use rmcp::service::{RequestContext, RoleServer};
use serde_json::Value;
use std::sync::Arc;

/// Converts a registry entry into an rmcp tool definition
pub fn to_mcp_tool(descriptor: &ToolDescriptor) -> Tool {
    let schema = match &descriptor.input_schema {
        Value::Object(map) => map.clone(),
        _ => serde_json::Map::new(),
    };

    Tool::new(descriptor.name, descriptor.description, Arc::new(schema))
}

impl ServerHandler for BinanceServer {
    /// Returns server information and capabilities
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "binance-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Binance MCP Server".to_string()),
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Binance MCP server. Tools cover market data, account information, \
                order management and wallet operations. Private tools are signed with \
                the configured API credentials."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = self
            .dispatcher
            .list_tools()
            .iter()
            .map(to_mcp_tool)
            .collect();

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    /// Every tool failure is reported in-band as an error result
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = request.arguments.map(Value::Object).unwrap_or(Value::Null);
        let outcome = self.dispatcher.invoke(&request.name, arguments).await;

        let content = vec![Content::text(outcome.text)];
        if outcome.is_error {
            Ok(CallToolResult::error(content))
        } else {
            Ok(CallToolResult::success(content))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tool_registry;

    #[test]
    fn test_to_mcp_tool_keeps_schema() {
        let descriptor = tool_registry()
            .iter()
            .find(|t| t.name == "get_klines")
            .unwrap();

        let tool = to_mcp_tool(descriptor);
        assert_eq!(tool.name, "get_klines");
        assert!(tool.input_schema.contains_key("properties"));
    }
}
