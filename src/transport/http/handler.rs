//! HTTP request handlers for MCP JSON-RPC endpoints
//!
//! POST /mcp carries one JSON-RPC message:
//! - initialize: create a session
//! - ping: liveness check
//! - tools/list: list all available tools
//! - tools/call: execute a tool
//! - notifications/*: accepted without a response body

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use super::error::{HttpTransportError, Result};
use super::jsonrpc::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, ServerCapabilities, ServerInfo,
    ToolCallParams, ToolCallResult, ToolsCapability, ToolsListResult, JSONRPC_VERSION,
    PROTOCOL_VERSION,
};
use super::session::{SessionError, SessionStore};
use crate::tools::ToolDispatcher;

pub const SESSION_HEADER: &str = "mcp-session-id";

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub sessions: SessionStore,
    pub dispatcher: ToolDispatcher,
}

impl AppState {
    pub fn new(sessions: SessionStore, dispatcher: ToolDispatcher) -> Self {
        Self {
            sessions,
            dispatcher,
        }
    }
}

/// Main JSON-RPC endpoint handler
///
/// POST /mcp
/// Content-Type: application/json
/// Mcp-Session-Id: <uuid> (required for everything except initialize)
pub async fn handle_jsonrpc(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(err) => {
            tracing::debug!(error = %err, "Rejected malformed JSON-RPC body");
            return HttpTransportError::from(err).into_response();
        }
    };

    tracing::debug!(method = %request.method, "Received JSON-RPC request");

    if request.is_notification() {
        tracing::debug!(method = %request.method, "Accepted notification");
        return StatusCode::ACCEPTED.into_response();
    }

    let id = request.id.clone().unwrap_or(Value::Null);

    match dispatch(&state, &headers, request).await {
        Ok((response, session_id)) => {
            let mut http_response = (StatusCode::OK, Json(response)).into_response();
            if let Some(value) = session_id.and_then(|s| HeaderValue::from_str(&s.to_string()).ok())
            {
                http_response.headers_mut().insert(SESSION_HEADER, value);
            }
            http_response
        }
        Err(err) => {
            tracing::warn!(error = %err, "JSON-RPC request failed");
            err.into_response_with_id(id)
        }
    }
}

/// Routes one request, returning the response and any newly created session
async fn dispatch(
    state: &AppState,
    headers: &HeaderMap,
    request: JsonRpcRequest,
) -> Result<(JsonRpcResponse, Option<Uuid>)> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(HttpTransportError::InvalidRequest(format!(
            "unsupported jsonrpc version {:?}",
            request.jsonrpc
        )));
    }

    let id = request.id.clone().unwrap_or(Value::Null);

    match request.method.as_str() {
        "initialize" => {
            let (result, session_id) = handle_initialize(state, headers, request.params)?;
            Ok((JsonRpcResponse::success(result, id), Some(session_id)))
        }
        "ping" => Ok((JsonRpcResponse::success(serde_json::json!({}), id), None)),
        "tools/list" => {
            require_session(state, headers)?;
            let result = serde_json::to_value(ToolsListResult {
                tools: state.dispatcher.list_tools(),
            })?;
            Ok((JsonRpcResponse::success(result, id), None))
        }
        "tools/call" => {
            require_session(state, headers)?;
            let result = handle_tools_call(state, request.params).await?;
            Ok((JsonRpcResponse::success(result, id), None))
        }
        other => Err(HttpTransportError::MethodNotFound(other.to_string())),
    }
}

/// Creates a session, recording who asked for it
fn handle_initialize(
    state: &AppState,
    headers: &HeaderMap,
    params: Option<Value>,
) -> Result<(Value, Uuid)> {
    let mut client_metadata = HashMap::new();

    if let Some(agent) = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
    {
        client_metadata.insert("user_agent".to_string(), agent.to_string());
    }
    if let Some(name) = params
        .as_ref()
        .and_then(|p| p.pointer("/clientInfo/name"))
        .and_then(Value::as_str)
    {
        client_metadata.insert("client_name".to_string(), name.to_string());
    }

    let session_id = state.sessions.create_session(client_metadata)?;

    tracing::info!(
        session_id = %session_id,
        active = state.sessions.session_count(),
        "Created new HTTP session"
    );

    let result = InitializeResult {
        protocol_version: PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
        },
        server_info: ServerInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        session_id: session_id.to_string(),
    };

    Ok((serde_json::to_value(result)?, session_id))
}

async fn handle_tools_call(state: &AppState, params: Option<Value>) -> Result<Value> {
    let params =
        params.ok_or_else(|| HttpTransportError::InvalidParams("Missing params".to_string()))?;
    let params: ToolCallParams = serde_json::from_value(params)
        .map_err(|e| HttpTransportError::InvalidParams(e.to_string()))?;

    tracing::debug!(tool_name = %params.name, "Calling tool");

    let outcome = state.dispatcher.invoke(&params.name, params.arguments).await;

    Ok(serde_json::to_value(ToolCallResult::from(outcome))?)
}

fn require_session(state: &AppState, headers: &HeaderMap) -> Result<()> {
    let session_id = extract_session_id(headers)?.ok_or(SessionError::InvalidSessionId)?;
    state.sessions.validate_session(session_id)?;
    Ok(())
}

/// Extract session ID from Mcp-Session-Id header
fn extract_session_id(headers: &HeaderMap) -> Result<Option<Uuid>> {
    let Some(header_value) = headers.get(SESSION_HEADER) else {
        return Ok(None);
    };

    let session_id = header_value
        .to_str()
        .ok()
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
        .ok_or(SessionError::InvalidSessionId)?;

    Ok(Some(session_id))
}
