//! Exchange Client Configuration
//!
//! Where the REST client points and how its HTTP connection pool is built.

use crate::error::ProviderError;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Binance REST client configuration
///
/// ## Environment Variables
///
/// - `BINANCE_BASE_URL`: REST base URL (default: https://api.binance.com)
/// - `BINANCE_HTTP_TIMEOUT_SECS`: request timeout in seconds (default: none,
///   the transport default applies)
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// Base URL without trailing slash
    pub base_url: String,

    /// Optional whole-request timeout
    pub timeout: Option<Duration>,

    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: format!("binance-mcp/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ExchangeConfig {
    /// Config pointing at an explicit base URL, everything else default
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("BINANCE_BASE_URL") {
            let base_url = base_url.trim();
            url::Url::parse(base_url).map_err(|e| {
                ProviderError::Configuration(format!("BINANCE_BASE_URL is not a valid URL: {e}"))
            })?;
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(secs) = lookup("BINANCE_HTTP_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ProviderError::Configuration(format!(
                    "BINANCE_HTTP_TIMEOUT_SECS must be a whole number of seconds, got {secs:?}"
                ))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
