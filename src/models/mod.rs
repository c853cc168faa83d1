//! Wire models for the PumpPortal data feed.
//!
//! Contains the subscription control frames sent to the feed and the
//! trade payloads received from it.

pub mod trade;

use serde::Serialize;

/// Control methods understood by the PumpPortal data feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Start streaming trades for the given token mints.
    SubscribeTokenTrade,
    /// Stop streaming trades for the given token mints.
    UnsubscribeTokenTrade,
}

impl Method {
    /// Returns the wire-format method name expected by the feed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::SubscribeTokenTrade => "subscribeTokenTrade",
            Method::UnsubscribeTokenTrade => "unsubscribeTokenTrade",
        }
    }
}

/// A token trade (un)subscription frame.
///
/// Serializes as `{"method": "subscribeTokenTrade", "keys": ["<mint>"]}`.
#[derive(Debug, Clone, Serialize)]
pub struct TokenTradeRequest {
    method: &'static str,
    keys: Vec<String>,
}

impl TokenTradeRequest {
    /// Creates a request subscribing to trades for one token address.
    #[must_use]
    pub fn subscribe(address: &str) -> Self {
        Self::new(Method::SubscribeTokenTrade, address)
    }

    /// Creates a request cancelling the trade stream for one token address.
    #[must_use]
    pub fn unsubscribe(address: &str) -> Self {
        Self::new(Method::UnsubscribeTokenTrade, address)
    }

    fn new(method: Method, address: &str) -> Self {
        Self {
            method: method.as_str(),
            keys: vec![address.to_string()],
        }
    }

    /// Returns the wire-format method name.
    pub fn method(&self) -> &str {
        self.method
    }

    /// Returns the token addresses this request applies to.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}
