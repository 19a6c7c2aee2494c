//! Binance HTTP Client
//!
//! HTTP client wrapper for the Binance REST API. One method per exchange
//! operation, one HTTP request per call. Private endpoints get a
//! `timestamp` and an HMAC-SHA256 `signature` appended to their parameters.

use crate::binance::requests::{
    AllOrdersRequest, DepositAddressRequest, KlinesRequest, MyTradesRequest, OrderRefRequest,
    PlaceOrderRequest, TransferHistoryRequest, WithdrawRequest,
};
use crate::binance::signer::QueryParams;
use crate::binance::types::{ApiErrorBody, Kline, OrderBook, RawOrderBook};
use crate::config::{Credentials, ExchangeConfig};
use crate::error::{ExchangeError, ProviderError};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Header carrying the identity key on every request
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Binance REST API HTTP client
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl std::fmt::Debug for BinanceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.credentials.api_key.masked())
            .field("secret_key", &"***")
            .finish()
    }
}

impl BinanceClient {
    /// Creates a client. No network traffic happens here.
    pub fn new(config: ExchangeConfig, credentials: Credentials) -> Result<Self, ProviderError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            ProviderError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Returns the configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========== Request plumbing ==========

    async fn public<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: QueryParams,
    ) -> Result<T, ExchangeError> {
        self.execute(method, path, params.to_query_string()).await
    }

    async fn signed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: QueryParams,
    ) -> Result<T, ExchangeError> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let query = params.sign(self.credentials.secret_key.expose_secret(), timestamp)?;
        self.execute(method, path, query).await
    }

    /// Issues exactly one request and decodes the body
    ///
    /// POST sends the query as a form body, GET and DELETE in the URL.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: String,
    ) -> Result<T, ExchangeError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = %method, path = path, "Sending Binance request");

        let request = if method == Method::POST {
            self.client
                .post(&url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(query)
        } else if query.is_empty() {
            self.client.request(method.clone(), &url)
        } else {
            self.client
                .request(method.clone(), format!("{}?{}", url, query))
        };

        let response = request
            .header(API_KEY_HEADER, self.credentials.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| {
                let err = ExchangeError::from(e);
                tracing::error!(
                    method = %method,
                    path = path,
                    error_type = err.error_type(),
                    error = %err,
                    "Binance request failed"
                );
                err
            })?;

        let status = response.status();
        let body = response.text().await.map_err(ExchangeError::from)?;

        if !status.is_success() {
            let err = status_error(status, body);
            tracing::error!(
                method = %method,
                path = path,
                error_type = err.error_type(),
                error = %err,
                "Binance returned an error"
            );
            return Err(err);
        }

        serde_json::from_str(&body).map_err(ExchangeError::from)
    }

    // ========== Market data (public) ==========

    /// Latest price. GET /api/v3/ticker/price
    pub async fn get_price(&self, symbol: &str) -> Result<Value, ExchangeError> {
        let params = QueryParams::new().push("symbol", symbol.to_uppercase());
        self.public(Method::GET, "/api/v3/ticker/price", params).await
    }

    /// 24-hour rolling window statistics. GET /api/v3/ticker/24hr
    pub async fn get_24hr_ticker(&self, symbol: &str) -> Result<Value, ExchangeError> {
        let params = QueryParams::new().push("symbol", symbol.to_uppercase());
        self.public(Method::GET, "/api/v3/ticker/24hr", params).await
    }

    /// Candlesticks with named fields. GET /api/v3/klines
    pub async fn get_klines(&self, request: &KlinesRequest) -> Result<Vec<Kline>, ExchangeError> {
        let rows: Vec<Vec<Value>> = self
            .public(Method::GET, "/api/v3/klines", request.to_params())
            .await?;

        rows.iter().map(|row| Kline::from_row(row)).collect()
    }

    /// Order book with `{price, quantity}` levels. GET /api/v3/depth
    pub async fn get_order_book(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<OrderBook, ExchangeError> {
        let params = QueryParams::new()
            .push("symbol", symbol.to_uppercase())
            .push_opt("limit", limit);

        let raw: RawOrderBook = self.public(Method::GET, "/api/v3/depth", params).await?;
        Ok(raw.into())
    }

    /// Recent public trades. GET /api/v3/trades
    pub async fn get_recent_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Value, ExchangeError> {
        let params = QueryParams::new()
            .push("symbol", symbol.to_uppercase())
            .push_opt("limit", limit);

        self.public(Method::GET, "/api/v3/trades", params).await
    }

    // ========== Account (signed) ==========

    /// Balances and permissions. GET /api/v3/account
    pub async fn get_account_info(&self) -> Result<Value, ExchangeError> {
        self.signed(Method::GET, "/api/v3/account", QueryParams::new()).await
    }

    /// Own trade history. GET /api/v3/myTrades
    pub async fn get_my_trades(&self, request: &MyTradesRequest) -> Result<Value, ExchangeError> {
        self.signed(Method::GET, "/api/v3/myTrades", request.to_params()).await
    }

    // ========== Orders (signed) ==========

    /// Open orders, optionally for one symbol. GET /api/v3/openOrders
    pub async fn get_open_orders(&self, symbol: Option<&str>) -> Result<Value, ExchangeError> {
        let params = QueryParams::new().push_opt("symbol", symbol.map(str::to_uppercase));
        self.signed(Method::GET, "/api/v3/openOrders", params).await
    }

    /// All orders for a symbol. GET /api/v3/allOrders
    pub async fn get_all_orders(&self, request: &AllOrdersRequest) -> Result<Value, ExchangeError> {
        self.signed(Method::GET, "/api/v3/allOrders", request.to_params()).await
    }

    /// New order. POST /api/v3/order
    pub async fn place_order(&self, request: &PlaceOrderRequest) -> Result<Value, ExchangeError> {
        tracing::info!(
            symbol = %request.symbol,
            side = request.side.as_str(),
            order_type = request.order_type.as_str(),
            "Placing order"
        );
        self.signed(Method::POST, "/api/v3/order", request.to_params()).await
    }

    /// Cancel one order. DELETE /api/v3/order
    pub async fn cancel_order(&self, request: &OrderRefRequest) -> Result<Value, ExchangeError> {
        self.signed(Method::DELETE, "/api/v3/order", request.to_params()).await
    }

    /// Cancel every open order on a symbol. DELETE /api/v3/openOrders
    pub async fn cancel_all_orders(&self, symbol: &str) -> Result<Value, ExchangeError> {
        let params = QueryParams::new().push("symbol", symbol.to_uppercase());
        self.signed(Method::DELETE, "/api/v3/openOrders", params).await
    }

    /// Order status. GET /api/v3/order
    pub async fn get_order(&self, request: &OrderRefRequest) -> Result<Value, ExchangeError> {
        self.signed(Method::GET, "/api/v3/order", request.to_params()).await
    }

    // ========== Wallet (signed) ==========

    /// GET /sapi/v1/capital/deposit/address
    pub async fn get_deposit_address(
        &self,
        request: &DepositAddressRequest,
    ) -> Result<Value, ExchangeError> {
        self.signed(Method::GET, "/sapi/v1/capital/deposit/address", request.to_params()).await
    }

    /// GET /sapi/v1/capital/deposit/hisrec
    pub async fn get_deposit_history(
        &self,
        request: &TransferHistoryRequest,
    ) -> Result<Value, ExchangeError> {
        self.signed(Method::GET, "/sapi/v1/capital/deposit/hisrec", request.to_params()).await
    }

    /// GET /sapi/v1/capital/withdraw/history
    pub async fn get_withdraw_history(
        &self,
        request: &TransferHistoryRequest,
    ) -> Result<Value, ExchangeError> {
        self.signed(Method::GET, "/sapi/v1/capital/withdraw/history", request.to_params()).await
    }

    /// Submit a withdrawal. POST /sapi/v1/capital/withdraw/apply
    pub async fn withdraw(&self, request: &WithdrawRequest) -> Result<Value, ExchangeError> {
        tracing::info!(coin = %request.coin, amount = %request.amount, "Submitting withdrawal");
        self.signed(Method::POST, "/sapi/v1/capital/withdraw/apply", request.to_params()).await
    }
}

/// Builds the error for a non-2xx response, preferring Binance's `{code, msg}`
fn status_error(status: StatusCode, body: String) -> ExchangeError {
    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(api) => ExchangeError::Api {
            status: status.as_u16(),
            code: api.code,
            msg: api.msg,
        },
        Err(_) => ExchangeError::Status {
            status: status.as_u16(),
            body,
        },
    }
}
