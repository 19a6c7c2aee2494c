//! Static tool registry
//!
//! Every tool's input schema is generated from its parameter struct, so the
//! schema a caller sees and the validation the router applies cannot drift.

use crate::binance::requests::{
    AllOrdersRequest, DepositAddressRequest, KlinesRequest, MyTradesRequest, NoParams,
    OptionalSymbolParams, OrderRefRequest, PlaceOrderRequest, SymbolLimitParams, SymbolParams,
    TransferHistoryRequest, WithdrawRequest,
};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

pub const GET_PRICE: &str = "get_price";
pub const GET_24HR_TICKER: &str = "get_24hr_ticker";
pub const GET_KLINES: &str = "get_klines";
pub const GET_ORDER_BOOK: &str = "get_order_book";
pub const GET_RECENT_TRADES: &str = "get_recent_trades";
pub const GET_ACCOUNT_INFO: &str = "get_account_info";
pub const GET_MY_TRADES: &str = "get_my_trades";
pub const GET_OPEN_ORDERS: &str = "get_open_orders";
pub const GET_ALL_ORDERS: &str = "get_all_orders";
pub const PLACE_ORDER: &str = "place_order";
pub const CANCEL_ORDER: &str = "cancel_order";
pub const CANCEL_ALL_ORDERS: &str = "cancel_all_orders";
pub const GET_ORDER: &str = "get_order";
pub const GET_DEPOSIT_ADDRESS: &str = "get_deposit_address";
pub const GET_DEPOSIT_HISTORY: &str = "get_deposit_history";
pub const GET_WITHDRAW_HISTORY: &str = "get_withdraw_history";
pub const WITHDRAW: &str = "withdraw";

/// A callable tool as advertised to MCP clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Builder for the tool table
pub struct CapabilityBuilder {
    tools: Vec<ToolDescriptor>,
}

impl CapabilityBuilder {
    /// Create a builder holding every Binance tool
    pub fn new() -> Self {
        let mut builder = Self { tools: Vec::new() };

        builder.add_market_data_tools();
        builder.add_account_tools();
        builder.add_order_tools();
        builder.add_wallet_tools();

        builder
    }

    pub fn build(self) -> Vec<ToolDescriptor> {
        self.tools
    }

    fn add<T: JsonSchema>(&mut self, name: &'static str, description: &'static str) {
        self.tools.push(ToolDescriptor {
            name,
            description,
            input_schema: input_schema::<T>(),
        });
    }

    // ========== Market Data Tools (Public, No Auth Required) ==========

    fn add_market_data_tools(&mut self) {
        self.add::<SymbolParams>(GET_PRICE, "Get the latest price for a trading pair");
        self.add::<SymbolParams>(
            GET_24HR_TICKER,
            "Get 24-hour rolling window price change statistics for a trading pair",
        );
        self.add::<KlinesRequest>(
            GET_KLINES,
            "Get candlestick (kline) data for a trading pair, with named OHLCV fields",
        );
        self.add::<SymbolLimitParams>(
            GET_ORDER_BOOK,
            "Get current order book depth (bids and asks) for a trading pair",
        );
        self.add::<SymbolLimitParams>(
            GET_RECENT_TRADES,
            "Get recent public trades for a trading pair",
        );
    }

    // ========== Account Tools (Authenticated) ==========

    fn add_account_tools(&mut self) {
        self.add::<NoParams>(
            GET_ACCOUNT_INFO,
            "Get account information including balances and trading permissions",
        );
        self.add::<MyTradesRequest>(
            GET_MY_TRADES,
            "Get the account's trade history for a trading pair",
        );
    }

    // ========== Order Management Tools (Authenticated) ==========

    fn add_order_tools(&mut self) {
        self.add::<OptionalSymbolParams>(
            GET_OPEN_ORDERS,
            "Get open orders for a trading pair, or for all pairs when no symbol is given",
        );
        self.add::<AllOrdersRequest>(
            GET_ALL_ORDERS,
            "Get all orders (open, canceled and filled) for a trading pair",
        );
        self.add::<PlaceOrderRequest>(PLACE_ORDER, "Place a new order");
        self.add::<OrderRefRequest>(
            CANCEL_ORDER,
            "Cancel an open order by orderId or origClientOrderId",
        );
        self.add::<SymbolParams>(CANCEL_ALL_ORDERS, "Cancel all open orders on a trading pair");
        self.add::<OrderRefRequest>(
            GET_ORDER,
            "Get the status of an order by orderId or origClientOrderId",
        );
    }

    // ========== Wallet Tools (Authenticated) ==========

    fn add_wallet_tools(&mut self) {
        self.add::<DepositAddressRequest>(
            GET_DEPOSIT_ADDRESS,
            "Get the deposit address for a coin",
        );
        self.add::<TransferHistoryRequest>(GET_DEPOSIT_HISTORY, "Get deposit history");
        self.add::<TransferHistoryRequest>(GET_WITHDRAW_HISTORY, "Get withdrawal history");
        self.add::<WithdrawRequest>(WITHDRAW, "Submit a withdrawal to an external address");
    }
}

impl Default for CapabilityBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide tool table, built on first use
pub fn tool_registry() -> &'static [ToolDescriptor] {
    static REGISTRY: OnceLock<Vec<ToolDescriptor>> = OnceLock::new();
    REGISTRY.get_or_init(|| CapabilityBuilder::new().build())
}

/// JSON Schema for a parameter struct, without the generator's `$schema`
/// and `title` keys
fn input_schema<T: JsonSchema>() -> Value {
    let mut schema = serde_json::to_value(schemars::schema_for!(T))
        .unwrap_or_else(|_| serde_json::json!({ "type": "object" }));

    if let Value::Object(map) = &mut schema {
        map.remove("$schema");
        map.remove("title");
        map.entry("type").or_insert_with(|| Value::from("object"));
    }

    schema
}
