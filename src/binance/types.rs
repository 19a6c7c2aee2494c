//! Binance API Type Definitions
//!
//! Only the responses that get reshaped have types here. Everything else is
//! passed through as `serde_json::Value`.

use crate::error::ExchangeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of positional fields mapped from each `/api/v3/klines` row
///
/// Binance sends a twelfth, unused field which is dropped.
pub const KLINE_FIELDS: usize = 11;

/// One candlestick with named fields
///
/// Row layout: `[openTime, open, high, low, close, volume, closeTime,
/// quoteAssetVolume, numberOfTrades, takerBuyBaseAssetVolume,
/// takerBuyQuoteAssetVolume, ignore]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kline {
    pub open_time: i64,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
    pub close_time: i64,
    pub quote_asset_volume: String,
    pub number_of_trades: u64,
    pub taker_buy_base_asset_volume: String,
    pub taker_buy_quote_asset_volume: String,
}

impl Kline {
    /// Maps one positional row into named fields
    pub fn from_row(row: &[Value]) -> Result<Self, ExchangeError> {
        if row.len() < KLINE_FIELDS {
            return Err(ExchangeError::Decode(format!(
                "Kline row has {} fields, expected at least {}",
                row.len(),
                KLINE_FIELDS
            )));
        }

        Ok(Self {
            open_time: int_field(row, 0, "openTime")?,
            open: text_field(row, 1, "open")?,
            high: text_field(row, 2, "high")?,
            low: text_field(row, 3, "low")?,
            close: text_field(row, 4, "close")?,
            volume: text_field(row, 5, "volume")?,
            close_time: int_field(row, 6, "closeTime")?,
            quote_asset_volume: text_field(row, 7, "quoteAssetVolume")?,
            number_of_trades: int_field(row, 8, "numberOfTrades")?,
            taker_buy_base_asset_volume: text_field(row, 9, "takerBuyBaseAssetVolume")?,
            taker_buy_quote_asset_volume: text_field(row, 10, "takerBuyQuoteAssetVolume")?,
        })
    }
}

fn int_field<T: TryFrom<i64>>(row: &[Value], index: usize, name: &str) -> Result<T, ExchangeError> {
    row[index]
        .as_i64()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| {
            ExchangeError::Decode(format!("Kline field {} is not an integer: {}", name, row[index]))
        })
}

fn text_field(row: &[Value], index: usize, name: &str) -> Result<String, ExchangeError> {
    match &row[index] {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ExchangeError::Decode(format!(
            "Kline field {} is not a decimal: {}",
            name, other
        ))),
    }
}

/// Raw response from `/api/v3/depth`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrderBook {
    pub last_update_id: i64,
    /// Bid levels `[price, quantity]`
    pub bids: Vec<(String, String)>,
    /// Ask levels `[price, quantity]`
    pub asks: Vec<(String, String)>,
}

/// One order book level with named fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: String,
    pub quantity: String,
}

impl From<(String, String)> for PriceLevel {
    fn from((price, quantity): (String, String)) -> Self {
        Self { price, quantity }
    }
}

/// Order book snapshot with named levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    pub last_update_id: i64,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

impl From<RawOrderBook> for OrderBook {
    fn from(raw: RawOrderBook) -> Self {
        Self {
            last_update_id: raw.last_update_id,
            bids: raw.bids.into_iter().map(PriceLevel::from).collect(),
            asks: raw.asks.into_iter().map(PriceLevel::from).collect(),
        }
    }
}

/// Error body Binance returns alongside non-2xx statuses
///
/// ```json
/// { "code": -1121, "msg": "Invalid symbol." }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kline_from_row() {
        let row = json!([
            1619712000000i64,
            "50050.00",
            "50100.00",
            "50000.00",
            "50080.00",
            "100.5",
            1619715600000i64,
            "5030000.00",
            1000,
            "60.5",
            "3030000.00"
        ]);

        let kline = Kline::from_row(row.as_array().unwrap()).unwrap();

        assert_eq!(
            serde_json::to_value(&kline).unwrap(),
            json!({
                "openTime": 1619712000000i64,
                "open": "50050.00",
                "high": "50100.00",
                "low": "50000.00",
                "close": "50080.00",
                "volume": "100.5",
                "closeTime": 1619715600000i64,
                "quoteAssetVolume": "5030000.00",
                "numberOfTrades": 1000,
                "takerBuyBaseAssetVolume": "60.5",
                "takerBuyQuoteAssetVolume": "3030000.00"
            })
        );
    }

    #[test]
    fn test_kline_ignores_trailing_field() {
        let row = json!([1, "1", "2", "0.5", "1.5", "10", 2, "15", 3, "4", "6", "0"]);
        let kline = Kline::from_row(row.as_array().unwrap()).unwrap();
        assert_eq!(kline.open_time, 1);
        assert_eq!(kline.taker_buy_quote_asset_volume, "6");
    }

    #[test]
    fn test_kline_short_row_rejected() {
        let row = json!([1, "1", "2"]);
        let err = Kline::from_row(row.as_array().unwrap()).unwrap_err();
        assert!(matches!(err, ExchangeError::Decode(_)));
    }

    #[test]
    fn test_kline_bad_trade_count_rejected() {
        let row = json!([1, "1", "2", "0.5", "1.5", "10", 2, "15", "many", "4", "6"]);
        assert!(Kline::from_row(row.as_array().unwrap()).is_err());
    }

    #[test]
    fn test_order_book_reshape() {
        let raw: RawOrderBook = serde_json::from_value(json!({
            "lastUpdateId": 1027024,
            "bids": [["50145.00", "2.5"]],
            "asks": [["50150.00", "1.2"], ["50151.00", "0.3"]]
        }))
        .unwrap();

        let book = OrderBook::from(raw);
        assert_eq!(
            serde_json::to_value(&book).unwrap(),
            json!({
                "lastUpdateId": 1027024,
                "bids": [{ "price": "50145.00", "quantity": "2.5" }],
                "asks": [
                    { "price": "50150.00", "quantity": "1.2" },
                    { "price": "50151.00", "quantity": "0.3" }
                ]
            })
        );
    }

    #[test]
    fn test_api_error_body() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"code":-2010,"msg":"Account has insufficient balance."}"#)
                .unwrap();
        assert_eq!(body.code, -2010);
        assert_eq!(body.msg, "Account has insufficient balance.");
    }
}
