//! JSON-RPC 2.0 message structures for the MCP HTTP transport
//!
//! - Request: { jsonrpc: "2.0", method, params, id }
//! - Response: { jsonrpc: "2.0", result, id } OR { jsonrpc: "2.0", error, id }
//! - Notification: { jsonrpc: "2.0", method, params } (no id)

use crate::tools::{ToolDescriptor, ToolOutcome};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC 2.0 request message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,

    /// Method name (e.g., "initialize", "tools/list", "tools/call")
    pub method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,

    /// Absent for notifications. An explicit `null` is still a request id.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Value>,
}

/// Maps any present value, `null` included, to `Some`
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Option<Value>, id: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id,
        }
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC 2.0 response message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,

    /// Request ID (matches request, or null)
    pub id: Value,
}

impl JsonRpcResponse {
    pub fn success(result: Value, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(error: JsonRpcError, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(code: i32, message: impl Into<String>, data: Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    // Standard JSON-RPC 2.0 error codes
    pub fn parse_error() -> Self {
        Self::new(-32700, "Parse error")
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(-32601, format!("Method not found: {}", method))
    }

    // MCP session error codes

    /// Session ID missing or unknown (-32002)
    pub fn session_missing() -> Self {
        Self::new(-32002, "Session ID missing or invalid")
    }

    /// Session expired (-32001)
    pub fn session_invalid() -> Self {
        Self::new(-32001, "Session expired or invalid")
    }

    /// Session limit exceeded (-32000)
    pub fn session_limit_exceeded(max: usize) -> Self {
        Self::with_data(
            -32000,
            "Session limit exceeded",
            serde_json::json!({ "max_sessions": max }),
        )
    }
}

/// `initialize` result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,

    /// Also returned in the `Mcp-Session-Id` response header
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// `tools/list` result
#[derive(Debug, Clone, Serialize)]
pub struct ToolsListResult<'a> {
    pub tools: &'a [ToolDescriptor],
}

/// `tools/call` params
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,

    #[serde(default)]
    pub arguments: Value,
}

/// `tools/call` result: one text content block plus the error flag
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<TextContent>,
    pub is_error: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl From<ToolOutcome> for ToolCallResult {
    fn from(outcome: ToolOutcome) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text",
                text: outcome.text,
            }],
            is_error: outcome.is_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notification_has_no_id() {
        let req: JsonRpcRequest = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        }))
        .unwrap();
        assert!(req.is_notification());
        assert!(req.params.is_none());

        let req = JsonRpcRequest::new("tools/list", None, Some(json!(1)));
        assert!(!req.is_notification());
    }

    #[test]
    fn test_null_id_is_a_request() {
        let req: JsonRpcRequest =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "id": null, "method": "ping" }))
                .unwrap();
        assert!(!req.is_notification());
        assert_eq!(req.id, Some(Value::Null));
    }

    #[test]
    fn test_error_response_shape() {
        let resp = JsonRpcResponse::error(JsonRpcError::method_not_found("foo/bar"), json!(7));
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["id"], 7);
        assert_eq!(value["error"]["code"], -32601);
        assert!(value.get("result").is_none());
    }

    #[test]
    fn test_session_error_codes() {
        assert_eq!(JsonRpcError::session_missing().code, -32002);
        assert_eq!(JsonRpcError::session_invalid().code, -32001);

        let limit = JsonRpcError::session_limit_exceeded(50);
        assert_eq!(limit.code, -32000);
        assert_eq!(limit.data.unwrap()["max_sessions"], 50);
    }

    #[test]
    fn test_tool_call_result_from_outcome() {
        let result = ToolCallResult::from(ToolOutcome {
            text: "Unknown tool: nope".to_string(),
            is_error: true,
        });

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "content": [{ "type": "text", "text": "Unknown tool: nope" }],
                "isError": true
            })
        );
    }

    #[test]
    fn test_tool_call_params_default_arguments() {
        let params: ToolCallParams =
            serde_json::from_value(json!({ "name": "get_account_info" })).unwrap();
        assert!(params.arguments.is_null());
    }
}
