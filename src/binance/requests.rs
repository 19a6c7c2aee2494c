//! Binance request parameter shapes
//!
//! Each struct doubles as a tool's input schema (via `schemars`) and knows
//! how to lay itself out as [`QueryParams`]. Field order in `to_params` is
//! the order parameters go on the wire and into the signature.

use crate::binance::signer::QueryParams;
use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Decimal quantity or price, kept as text to preserve precision
///
/// Accepts either a JSON string (`"0.001"`) or a JSON number (`0.001`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DecimalString(String);

impl DecimalString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DecimalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JsonSchema for DecimalString {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> Cow<'static, str> {
        "DecimalString".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({ "type": ["string", "number"] })
    }
}

impl<'de> Deserialize<'de> for DecimalString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DecimalVisitor;

        impl serde::de::Visitor<'_> for DecimalVisitor {
            type Value = DecimalString;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal number or numeric string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                let v = v.trim();
                if v.is_empty() {
                    return Err(E::custom("decimal value must not be empty"));
                }
                Ok(DecimalString(v.to_string()))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(DecimalString(v.to_string()))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(DecimalString(v.to_string()))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
                if !v.is_finite() {
                    return Err(E::custom("decimal value must be finite"));
                }
                Ok(DecimalString(v.to_string()))
            }
        }

        deserializer.deserialize_any(DecimalVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Limit,
    Market,
    StopLoss,
    StopLossLimit,
    TakeProfit,
    TakeProfitLimit,
    LimitMaker,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::Market => "MARKET",
            OrderType::StopLoss => "STOP_LOSS",
            OrderType::StopLossLimit => "STOP_LOSS_LIMIT",
            OrderType::TakeProfit => "TAKE_PROFIT",
            OrderType::TakeProfitLimit => "TAKE_PROFIT_LIMIT",
            OrderType::LimitMaker => "LIMIT_MAKER",
        }
    }
}

/// GTC (good till canceled), IOC (immediate or cancel), FOK (fill or kill)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum TimeInForce {
    #[serde(rename = "GTC")]
    Gtc,
    #[serde(rename = "IOC")]
    Ioc,
    #[serde(rename = "FOK")]
    Fok,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderResponseType {
    Ack,
    Result,
    Full,
}

impl OrderResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderResponseType::Ack => "ACK",
            OrderResponseType::Result => "RESULT",
            OrderResponseType::Full => "FULL",
        }
    }
}

/// Candlestick bucket width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum KlineInterval {
    #[serde(rename = "1s")]
    OneSecond,
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "3m")]
    ThreeMinutes,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "2h")]
    TwoHours,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "8h")]
    EightHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
}

impl KlineInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            KlineInterval::OneSecond => "1s",
            KlineInterval::OneMinute => "1m",
            KlineInterval::ThreeMinutes => "3m",
            KlineInterval::FiveMinutes => "5m",
            KlineInterval::FifteenMinutes => "15m",
            KlineInterval::ThirtyMinutes => "30m",
            KlineInterval::OneHour => "1h",
            KlineInterval::TwoHours => "2h",
            KlineInterval::FourHours => "4h",
            KlineInterval::SixHours => "6h",
            KlineInterval::EightHours => "8h",
            KlineInterval::TwelveHours => "12h",
            KlineInterval::OneDay => "1d",
            KlineInterval::ThreeDays => "3d",
            KlineInterval::OneWeek => "1w",
            KlineInterval::OneMonth => "1M",
        }
    }
}

/// No parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Common parameter for symbol-based tools
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymbolParams {
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT, ETHUSDT)")]
    pub symbol: String,
}

/// Optional symbol filter
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionalSymbolParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Trading pair symbol; all symbols when omitted")]
    pub symbol: Option<String>,
}

/// Symbol plus a result-count limit (order book, recent trades)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymbolLimitParams {
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Number of entries to return")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KlinesRequest {
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    #[schemars(description = "Kline interval (e.g., 1m, 1h, 1d)")]
    pub interval: KlineInterval,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Start time in milliseconds since epoch")]
    pub start_time: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "End time in milliseconds since epoch")]
    pub end_time: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Number of klines to return (default 500, max 1000)")]
    pub limit: Option<u32>,
}

impl KlinesRequest {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .push("symbol", self.symbol.to_uppercase())
            .push("interval", self.interval.as_str())
            .push_opt("startTime", self.start_time)
            .push_opt("endTime", self.end_time)
            .push_opt("limit", self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MyTradesRequest {
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Start time in milliseconds since epoch")]
    pub start_time: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "End time in milliseconds since epoch")]
    pub end_time: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Trade id to fetch from")]
    pub from_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Number of trades to return (default 500, max 1000)")]
    pub limit: Option<u32>,
}

impl MyTradesRequest {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .push("symbol", self.symbol.to_uppercase())
            .push_opt("startTime", self.start_time)
            .push_opt("endTime", self.end_time)
            .push_opt("fromId", self.from_id)
            .push_opt("limit", self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllOrdersRequest {
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Return orders with id >= orderId")]
    pub order_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Start time in milliseconds since epoch")]
    pub start_time: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "End time in milliseconds since epoch")]
    pub end_time: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Number of orders to return (default 500, max 1000)")]
    pub limit: Option<u32>,
}

impl AllOrdersRequest {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .push("symbol", self.symbol.to_uppercase())
            .push_opt("orderId", self.order_id)
            .push_opt("startTime", self.start_time)
            .push_opt("endTime", self.end_time)
            .push_opt("limit", self.limit)
    }
}

/// New order
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    #[schemars(description = "Order side")]
    pub side: OrderSide,

    #[serde(rename = "type")]
    #[schemars(description = "Order type")]
    pub order_type: OrderType,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Time in force (required for LIMIT orders)")]
    pub time_in_force: Option<TimeInForce>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Order quantity in base asset")]
    pub quantity: Option<DecimalString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Quote asset amount to spend or receive (MARKET orders)")]
    pub quote_order_qty: Option<DecimalString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Limit price")]
    pub price: Option<DecimalString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Client-assigned order id")]
    pub new_client_order_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Trigger price for STOP_LOSS and TAKE_PROFIT orders")]
    pub stop_price: Option<DecimalString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Visible quantity for iceberg orders")]
    pub iceberg_qty: Option<DecimalString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Response detail level")]
    pub new_order_resp_type: Option<OrderResponseType>,
}

impl PlaceOrderRequest {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .push("symbol", self.symbol.to_uppercase())
            .push("side", self.side.as_str())
            .push("type", self.order_type.as_str())
            .push_opt("timeInForce", self.time_in_force.map(|t| t.as_str()))
            .push_opt("quantity", self.quantity.as_ref())
            .push_opt("quoteOrderQty", self.quote_order_qty.as_ref())
            .push_opt("price", self.price.as_ref())
            .push_opt("newClientOrderId", self.new_client_order_id.as_deref())
            .push_opt("stopPrice", self.stop_price.as_ref())
            .push_opt("icebergQty", self.iceberg_qty.as_ref())
            .push_opt("newOrderRespType", self.new_order_resp_type.map(|t| t.as_str()))
    }
}

/// Identifies one order by exchange id or client id
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRefRequest {
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Exchange order id (orderId or origClientOrderId is required)")]
    pub order_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Client order id (orderId or origClientOrderId is required)")]
    pub orig_client_order_id: Option<String>,
}

impl OrderRefRequest {
    /// Binance needs at least one of the two ids
    pub fn validate(&self) -> Result<(), String> {
        if self.order_id.is_none() && self.orig_client_order_id.is_none() {
            return Err("either orderId or origClientOrderId must be provided".to_string());
        }
        Ok(())
    }

    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .push("symbol", self.symbol.to_uppercase())
            .push_opt("orderId", self.order_id)
            .push_opt("origClientOrderId", self.orig_client_order_id.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepositAddressRequest {
    #[schemars(description = "Coin name (e.g., BTC, USDT)")]
    pub coin: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Network (e.g., BTC, ETH, BSC); coin default when omitted")]
    pub network: Option<String>,
}

impl DepositAddressRequest {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .push("coin", self.coin.to_uppercase())
            .push_opt("network", self.network.as_deref())
    }
}

/// Deposit or withdrawal history filter
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferHistoryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Coin name (e.g., BTC)")]
    pub coin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Status code filter as defined by Binance")]
    pub status: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Start time in milliseconds since epoch")]
    pub start_time: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "End time in milliseconds since epoch")]
    pub end_time: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Pagination offset")]
    pub offset: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Number of records to return (default 1000)")]
    pub limit: Option<u32>,
}

impl TransferHistoryRequest {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("coin", self.coin.as_ref().map(|c| c.to_uppercase()))
            .push_opt("status", self.status)
            .push_opt("startTime", self.start_time)
            .push_opt("endTime", self.end_time)
            .push_opt("offset", self.offset)
            .push_opt("limit", self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    #[schemars(description = "Coin name (e.g., BTC)")]
    pub coin: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Network to withdraw on; coin default when omitted")]
    pub network: Option<String>,

    #[schemars(description = "Destination address")]
    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Secondary address identifier (memo or tag)")]
    pub address_tag: Option<String>,

    #[schemars(description = "Amount to withdraw")]
    pub amount: DecimalString,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Address book label")]
    pub name: Option<String>,
}

impl WithdrawRequest {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .push("coin", self.coin.to_uppercase())
            .push_opt("network", self.network.as_deref())
            .push("address", &self.address)
            .push_opt("addressTag", self.address_tag.as_deref())
            .push("amount", &self.amount)
            .push_opt("name", self.name.as_deref())
    }
}
