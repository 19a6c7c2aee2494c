//! HTTP transport error handling
//!
//! Converts transport errors to JSON-RPC error responses with matching HTTP
//! status codes. Tool failures never reach this type; they are returned
//! in-band as `isError` results.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use super::jsonrpc::{JsonRpcError, JsonRpcResponse};
use super::session::SessionError;

/// HTTP transport errors
#[derive(Debug, thiserror::Error)]
pub enum HttpTransportError {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid JSON-RPC request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

impl HttpTransportError {
    pub fn to_jsonrpc_error(&self) -> JsonRpcError {
        match self {
            HttpTransportError::Session(SessionError::SessionNotFound(_))
            | HttpTransportError::Session(SessionError::InvalidSessionId) => {
                JsonRpcError::session_missing()
            }
            HttpTransportError::Session(SessionError::SessionExpired(_)) => {
                JsonRpcError::session_invalid()
            }
            HttpTransportError::Session(SessionError::SessionLimitExceeded(max)) => {
                JsonRpcError::session_limit_exceeded(*max)
            }
            HttpTransportError::JsonParse(_) => JsonRpcError::parse_error(),
            HttpTransportError::InvalidRequest(msg) => {
                JsonRpcError::new(-32600, format!("Invalid Request: {}", msg))
            }
            HttpTransportError::MethodNotFound(method) => JsonRpcError::method_not_found(method),
            HttpTransportError::InvalidParams(msg) => {
                JsonRpcError::new(-32602, format!("Invalid params: {}", msg))
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpTransportError::Session(SessionError::SessionLimitExceeded(_)) => {
                StatusCode::TOO_MANY_REQUESTS
            }
            HttpTransportError::Session(_) => StatusCode::UNAUTHORIZED,
            HttpTransportError::JsonParse(_) => StatusCode::BAD_REQUEST,
            HttpTransportError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            HttpTransportError::MethodNotFound(_) => StatusCode::NOT_FOUND,
            HttpTransportError::InvalidParams(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Renders the error against a known request id
    pub fn into_response_with_id(self, id: Value) -> Response {
        let status = self.status_code();
        let response = JsonRpcResponse::error(self.to_jsonrpc_error(), id);
        (status, Json(response)).into_response()
    }
}

impl IntoResponse for HttpTransportError {
    fn into_response(self) -> Response {
        self.into_response_with_id(Value::Null)
    }
}

pub type Result<T> = std::result::Result<T, HttpTransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_conversion() {
        let err = HttpTransportError::Session(SessionError::SessionNotFound(uuid::Uuid::new_v4()));

        assert_eq!(err.to_jsonrpc_error().code, -32002);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_parse_error_conversion() {
        let err = HttpTransportError::from(serde_json::from_str::<Value>("{nope").unwrap_err());

        assert_eq!(err.to_jsonrpc_error().code, -32700);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_method_not_found_conversion() {
        let err = HttpTransportError::MethodNotFound("resources/list".to_string());

        let jsonrpc_err = err.to_jsonrpc_error();
        assert_eq!(jsonrpc_err.code, -32601);
        assert!(jsonrpc_err.message.contains("resources/list"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_session_limit_conversion() {
        let err = HttpTransportError::Session(SessionError::SessionLimitExceeded(50));

        let jsonrpc_err = err.to_jsonrpc_error();
        assert_eq!(jsonrpc_err.code, -32000);
        assert!(jsonrpc_err.data.is_some());
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }
}
