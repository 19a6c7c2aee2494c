//! Tool routing
//!
//! Maps a tool name and its raw JSON arguments to exactly one client call.

use crate::binance::client::BinanceClient;
use crate::binance::requests::{
    AllOrdersRequest, DepositAddressRequest, KlinesRequest, MyTradesRequest, NoParams,
    OptionalSymbolParams, OrderRefRequest, PlaceOrderRequest, SymbolLimitParams, SymbolParams,
    TransferHistoryRequest, WithdrawRequest,
};
use crate::error::{ProviderError, Result};
use crate::tools::capabilities::*;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserializes tool arguments into the tool's parameter struct
///
/// `null` is read as an empty object so parameterless tools can be called
/// without arguments.
fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };

    serde_json::from_value(arguments).map_err(|e| ProviderError::InvalidArguments(e.to_string()))
}

/// Route tool invocation to the matching client method
pub async fn route_tool(client: &BinanceClient, name: &str, arguments: Value) -> Result<Value> {
    tracing::debug!("Routing tool: {}", name);

    let result = match name {
        // Market data tools (public, no auth)
        GET_PRICE => {
            let params: SymbolParams = parse_args(arguments)?;
            tracing::info!("Getting price for symbol: {}", params.symbol);
            client.get_price(&params.symbol).await?
        }
        GET_24HR_TICKER => {
            let params: SymbolParams = parse_args(arguments)?;
            tracing::info!("Getting 24h ticker for symbol: {}", params.symbol);
            client.get_24hr_ticker(&params.symbol).await?
        }
        GET_KLINES => {
            let request: KlinesRequest = parse_args(arguments)?;
            tracing::info!(
                "Getting klines for symbol: {}, interval: {}, limit: {:?}",
                request.symbol,
                request.interval.as_str(),
                request.limit
            );
            serde_json::to_value(client.get_klines(&request).await?)?
        }
        GET_ORDER_BOOK => {
            let params: SymbolLimitParams = parse_args(arguments)?;
            tracing::info!(
                "Getting orderbook for symbol: {}, limit: {:?}",
                params.symbol,
                params.limit
            );
            serde_json::to_value(client.get_order_book(&params.symbol, params.limit).await?)?
        }
        GET_RECENT_TRADES => {
            let params: SymbolLimitParams = parse_args(arguments)?;
            tracing::info!(
                "Getting recent trades for symbol: {}, limit: {:?}",
                params.symbol,
                params.limit
            );
            client.get_recent_trades(&params.symbol, params.limit).await?
        }

        // Account tools (authenticated)
        GET_ACCOUNT_INFO => {
            let _: NoParams = parse_args(arguments)?;
            tracing::info!("Getting account information");
            client.get_account_info().await?
        }
        GET_MY_TRADES => {
            let request: MyTradesRequest = parse_args(arguments)?;
            tracing::info!("Getting my trades for symbol: {}", request.symbol);
            client.get_my_trades(&request).await?
        }

        // Order management tools (authenticated)
        GET_OPEN_ORDERS => {
            let params: OptionalSymbolParams = parse_args(arguments)?;
            tracing::info!("Getting open orders for symbol: {:?}", params.symbol);
            client.get_open_orders(params.symbol.as_deref()).await?
        }
        GET_ALL_ORDERS => {
            let request: AllOrdersRequest = parse_args(arguments)?;
            tracing::info!("Getting all orders for symbol: {}", request.symbol);
            client.get_all_orders(&request).await?
        }
        PLACE_ORDER => {
            let request: PlaceOrderRequest = parse_args(arguments)?;
            client.place_order(&request).await?
        }
        CANCEL_ORDER => {
            let request: OrderRefRequest = parse_args(arguments)?;
            request.validate().map_err(ProviderError::InvalidArguments)?;
            tracing::info!("Canceling order on symbol: {}", request.symbol);
            client.cancel_order(&request).await?
        }
        CANCEL_ALL_ORDERS => {
            let params: SymbolParams = parse_args(arguments)?;
            tracing::info!("Canceling all open orders on symbol: {}", params.symbol);
            client.cancel_all_orders(&params.symbol).await?
        }
        GET_ORDER => {
            let request: OrderRefRequest = parse_args(arguments)?;
            request.validate().map_err(ProviderError::InvalidArguments)?;
            tracing::info!("Getting order status on symbol: {}", request.symbol);
            client.get_order(&request).await?
        }

        // Wallet tools (authenticated)
        GET_DEPOSIT_ADDRESS => {
            let request: DepositAddressRequest = parse_args(arguments)?;
            tracing::info!("Getting deposit address for coin: {}", request.coin);
            client.get_deposit_address(&request).await?
        }
        GET_DEPOSIT_HISTORY => {
            let request: TransferHistoryRequest = parse_args(arguments)?;
            tracing::info!("Getting deposit history for coin: {:?}", request.coin);
            client.get_deposit_history(&request).await?
        }
        GET_WITHDRAW_HISTORY => {
            let request: TransferHistoryRequest = parse_args(arguments)?;
            tracing::info!("Getting withdrawal history for coin: {:?}", request.coin);
            client.get_withdraw_history(&request).await?
        }
        WITHDRAW => {
            let request: WithdrawRequest = parse_args(arguments)?;
            client.withdraw(&request).await?
        }

        // Unknown tool
        _ => return Err(ProviderError::UnknownTool(name.to_string())),
    };

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_args_null_is_empty_object() {
        let params: NoParams = parse_args(Value::Null).unwrap();
        let _ = params;

        let params: OptionalSymbolParams = parse_args(Value::Null).unwrap();
        assert!(params.symbol.is_none());
    }

    #[test]
    fn test_parse_args_missing_required_field() {
        let err = parse_args::<SymbolParams>(json!({})).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidArguments(ref m) if m.contains("symbol")));
    }

    #[test]
    fn test_parse_args_wrong_type() {
        let err = parse_args::<SymbolLimitParams>(json!({ "symbol": "BTCUSDT", "limit": "ten" }))
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidArguments(_)));
    }
}
