//! Binance API Client
//!
//! HTTP client, request shapes, signing and response types for the Binance
//! REST API.

pub mod client;
pub mod requests;
pub mod signer;
pub mod types;

// Re-export commonly used types
pub use client::{BinanceClient, API_KEY_HEADER};
pub use signer::QueryParams;
pub use types::{Kline, OrderBook, PriceLevel};
