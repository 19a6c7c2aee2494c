//! API Credential Management
//!
//! Binance API credentials loaded once at startup. Both keys are required;
//! a missing or blank key is a fatal configuration error.
//! Credentials are never logged and are masked when displayed.

use crate::error::ProviderError;
use std::fmt;

pub const API_KEY_VAR: &str = "BINANCE_API_KEY";
pub const SECRET_KEY_VAR: &str = "BINANCE_SECRET_KEY";

/// Secure string wrapper that masks sensitive data in logs
///
/// Debug output shows only `SecretString(***)` and Display shows the
/// truncated form `first4...last4`.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: String) -> Self {
        SecretString(value)
    }

    /// Returns a reference to the inner string
    ///
    /// Only use this when actually building a request. Never log the result.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns a masked version of the secret for safe logging
    pub fn masked(&self) -> String {
        let s = &self.0;
        if s.chars().count() <= 8 {
            return "***".to_string();
        }
        let head: String = s.chars().take(4).collect();
        let tail: String = s
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString(***)")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString::new(s)
    }
}

/// Binance API credentials
#[derive(Clone, Debug)]
pub struct Credentials {
    /// Binance API key, sent in the `X-MBX-APIKEY` header
    pub api_key: SecretString,
    /// Binance secret key, used only as the HMAC key
    pub secret_key: SecretString,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            secret_key: SecretString::new(secret_key.into()),
        }
    }

    /// Loads credentials from `BINANCE_API_KEY` and `BINANCE_SECRET_KEY`
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads credentials through an arbitrary variable lookup
    ///
    /// Values are trimmed. Unset and blank values are both rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = required(&lookup, API_KEY_VAR)?;
        let secret_key = required(&lookup, SECRET_KEY_VAR)?;

        Ok(Self::new(api_key, secret_key))
    }
}

fn required<F>(lookup: &F, name: &str) -> Result<String, ProviderError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).ok_or_else(|| {
        ProviderError::Configuration(format!(
            "{name} not set. Configure it in your MCP client settings:\n\
             \"env\": {{ \"{name}\": \"...\" }}"
        ))
    })?;

    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ProviderError::Configuration(format!(
            "{name} is empty after trimming whitespace"
        )));
    }

    Ok(value)
}
