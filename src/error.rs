use thiserror::Error;

/// Errors surfaced by the tool layer.
///
/// Everything except `Configuration` is caught at the dispatch boundary and
/// turned into an error-flagged tool result.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] ExchangeError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the Binance REST client
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Connection error: {0}")]
    Transport(String),

    /// Non-2xx response carrying a Binance `{code, msg}` body
    #[error("Binance API error (HTTP {status}, code {code}): {msg}")]
    Api { status: u16, code: i64, msg: String },

    /// Non-2xx response with a body Binance did not shape as an error object
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Parse error: {0}")]
    Decode(String),

    #[error("Signing error: {0}")]
    Signing(String),
}

impl ExchangeError {
    /// HTTP status of the failed call, when the exchange answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ExchangeError::Api { status, .. } | ExchangeError::Status { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ExchangeError::Transport(_) => "connection_error",
            ExchangeError::Api { .. } => "api_error",
            ExchangeError::Status { .. } => "http_error",
            ExchangeError::Decode(_) => "parse_error",
            ExchangeError::Signing(_) => "signing_error",
        }
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExchangeError::Transport(
                "Request timeout. Please check your internet connection.".to_string(),
            )
        } else if err.is_connect() {
            ExchangeError::Transport(
                "Failed to connect to Binance API. Please check your internet connection."
                    .to_string(),
            )
        } else if err.is_decode() {
            ExchangeError::Decode(err.to_string())
        } else {
            ExchangeError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        ExchangeError::Decode(format!("JSON parsing failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = ProviderError::from(ExchangeError::Api {
            status: 400,
            code: -1121,
            msg: "Invalid symbol.".to_string(),
        });

        let text = err.to_string();
        assert!(text.starts_with("Request failed:"));
        assert!(text.contains("-1121"));
        assert!(text.contains("Invalid symbol."));
    }

    #[test]
    fn test_status_accessor() {
        let api = ExchangeError::Api {
            status: 401,
            code: -2015,
            msg: "Invalid API-key".to_string(),
        };
        assert_eq!(api.status(), Some(401));
        assert_eq!(api.error_type(), "api_error");

        let transport = ExchangeError::Transport("boom".to_string());
        assert_eq!(transport.status(), None);
        assert_eq!(transport.error_type(), "connection_error");
    }

    #[test]
    fn test_unknown_tool_message_contains_name() {
        let err = ProviderError::UnknownTool("get_moon_price".to_string());
        assert_eq!(err.to_string(), "Unknown tool: get_moon_price");
    }
}
