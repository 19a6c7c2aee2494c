//! Request parameters and HMAC-SHA256 request signing
//!
//! Binance validates the signature against the exact byte string it
//! receives, so the string that is signed is also the string that is sent.
//! Parameters keep insertion order; nothing is sorted.

use crate::error::ExchangeError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Insertion-ordered request parameters
///
/// Optional inputs go through [`QueryParams::push_opt`], which leaves the key
/// out entirely when the value is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter
    pub fn push(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Appends a parameter only when a value is present
    pub fn push_opt<T: ToString>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encodes the parameters as `k1=v1&k2=v2`, in insertion order
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish()
    }

    /// Appends `timestamp`, signs, appends `signature`
    ///
    /// Returns the final query string, signature last.
    pub fn sign(mut self, secret: &str, timestamp_ms: i64) -> Result<String, ExchangeError> {
        self = self.push("timestamp", timestamp_ms);
        let payload = self.to_query_string();
        let signature = sign_payload(secret, &payload)?;

        Ok(format!("{}&signature={}", payload, signature))
    }
}

/// Generates the lowercase hex HMAC-SHA256 of `payload` keyed by `secret`
pub fn sign_payload(secret: &str, payload: &str) -> Result<String, ExchangeError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ExchangeError::Signing(format!("Invalid secret key: {}", e)))?;

    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC_SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";

    #[test]
    fn test_binance_documentation_vector() {
        let payload = concat!(
            "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1",
            "&recvWindow=5000&timestamp=1499827319559"
        );
        assert_eq!(
            sign_payload(DOC_SECRET, payload).unwrap(),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_sign_appends_timestamp_then_signature() {
        let query = QueryParams::new()
            .push("symbol", "LTCBTC")
            .push("side", "BUY")
            .push("type", "LIMIT")
            .push("timeInForce", "GTC")
            .push("quantity", 1)
            .push("price", "0.1")
            .push("recvWindow", 5000)
            .sign(DOC_SECRET, 1499827319559)
            .unwrap();

        assert_eq!(
            query,
            "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1\
             &recvWindow=5000&timestamp=1499827319559\
             &signature=c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_signature_is_deterministic() {
        let build = || QueryParams::new().push("symbol", "BTCUSDT").push("limit", 10);

        let a = build().sign("secret", 1_700_000_000_000).unwrap();
        let b = build().sign("secret", 1_700_000_000_000).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_changes_with_value_and_key() {
        let base = sign_payload("secret", "symbol=BTCUSDT&timestamp=1").unwrap();
        let other_value = sign_payload("secret", "symbol=ETHUSDT&timestamp=1").unwrap();
        let other_key = sign_payload("secret2", "symbol=BTCUSDT&timestamp=1").unwrap();

        assert_ne!(base, other_value);
        assert_ne!(base, other_key);
        assert_eq!(base.len(), 64);
        assert!(base.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let params = QueryParams::new().push("z", 1).push("a", 2).push("m", 3);
        assert_eq!(params.to_query_string(), "z=1&a=2&m=3");
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_push_opt_omits_absent_values() {
        let params = QueryParams::new()
            .push("symbol", "BTCUSDT")
            .push_opt("limit", None::<u32>)
            .push_opt("startTime", Some(1_000i64));

        assert_eq!(params.len(), 2);
        assert!(!params.contains("limit"));
        assert_eq!(params.get("startTime"), Some("1000"));
        assert_eq!(params.to_query_string(), "symbol=BTCUSDT&startTime=1000");
    }

    #[test]
    fn test_values_are_form_encoded() {
        let params = QueryParams::new().push("newClientOrderId", "my order/1");
        assert_eq!(params.to_query_string(), "newClientOrderId=my+order%2F1");
    }
}
