//! Configuration Management
//!
//! Credentials, exchange client settings and HTTP transport settings, all
//! read from the environment once at startup.

pub mod credentials;
pub mod exchange;

#[cfg(feature = "http_transport")]
pub mod http;

pub use credentials::{Credentials, SecretString};
pub use exchange::ExchangeConfig;

#[cfg(feature = "http_transport")]
pub use http::HttpConfig;
