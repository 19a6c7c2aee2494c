//! Tool registry and dispatcher
//!
//! The single entry point every transport calls. Errors never leave
//! [`ToolDispatcher::invoke`]; they come back as error-flagged outcomes.

pub mod capabilities;
pub mod router;

pub use capabilities::{tool_registry, CapabilityBuilder, ToolDescriptor};

use crate::binance::BinanceClient;
use crate::error::ProviderError;
use serde::Serialize;
use serde_json::Value;

/// Result of one tool invocation, ready to be rendered as text content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutcome {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutcome {
    pub fn success(text: String) -> Self {
        Self {
            text,
            is_error: false,
        }
    }

    pub fn failure(err: &ProviderError) -> Self {
        Self {
            text: err.to_string(),
            is_error: true,
        }
    }
}

/// Routes tool calls to the Binance client
#[derive(Clone, Debug)]
pub struct ToolDispatcher {
    client: BinanceClient,
}

impl ToolDispatcher {
    pub fn new(client: BinanceClient) -> Self {
        Self { client }
    }

    /// All tool descriptors, in registry order
    pub fn list_tools(&self) -> &'static [ToolDescriptor] {
        tool_registry()
    }

    /// Invokes a tool by name
    ///
    /// The successful result is returned as pretty-printed JSON text.
    pub async fn invoke(&self, name: &str, arguments: Value) -> ToolOutcome {
        let result = router::route_tool(&self.client, name, arguments)
            .await
            .and_then(|value| serde_json::to_string_pretty(&value).map_err(ProviderError::from));

        match result {
            Ok(text) => ToolOutcome::success(text),
            Err(err) => {
                tracing::warn!(tool = name, error = %err, "Tool invocation failed");
                ToolOutcome::failure(&err)
            }
        }
    }
}
