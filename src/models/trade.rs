//! Trade payload models.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// Shown in place of any trade field the feed did not provide.
pub const FALLBACK: &str = "N/A";

/// Format used for the receipt timestamp of a trade row.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A number-like trade field.
///
/// Values that do not fit a [`Decimal`] (huge floats, booleans, free text)
/// are kept as raw JSON and rendered as-is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(Decimal),
    Raw(Value),
}

impl Amount {
    /// Returns the decimal value, if the field held one.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Amount::Number(value) => Some(*value),
            Amount::Raw(_) => None,
        }
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::Number(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(value) => write!(f, "{value}"),
            Amount::Raw(value) => f.write_str(&raw_text(value)),
        }
    }
}

/// One entry of the `data` array of a feed message.
///
/// Every field is optional; absent and `null` values decode to `None`.
/// No field type is enforced, so one odd value never drops the entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TradeData {
    pub symbol: Option<Value>,
    /// Order size in SOL.
    #[serde(rename = "solAmount")]
    pub sol_amount: Option<Amount>,
    #[serde(rename = "initialBuy")]
    pub initial_buy: Option<Amount>,
}

/// A decoded trade, ready to be rendered as one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeEvent {
    /// Token ticker, or [`FALLBACK`] when the feed omitted it.
    pub ticker: String,
    pub order_size: Option<Amount>,
    pub price: Option<Amount>,
    /// Wall-clock time the trade was received.
    pub timestamp: DateTime<Utc>,
}

impl TradeEvent {
    /// Builds an event from a feed entry, stamping it with `received_at`.
    pub fn from_data(data: TradeData, received_at: DateTime<Utc>) -> Self {
        Self {
            ticker: data
                .symbol
                .map_or_else(|| FALLBACK.to_string(), |symbol| raw_text(&symbol)),
            order_size: data.sol_amount,
            price: data.initial_buy,
            timestamp: received_at,
        }
    }

    /// Order size as displayed, or [`FALLBACK`].
    pub fn size_label(&self) -> String {
        label(self.order_size.as_ref())
    }

    /// Price as displayed, or [`FALLBACK`].
    pub fn price_label(&self) -> String {
        label(self.price.as_ref())
    }

    /// Receipt time formatted with [`TIME_FORMAT`].
    pub fn time_label(&self) -> String {
        self.timestamp.format(TIME_FORMAT).to_string()
    }
}

impl fmt::Display for TradeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ticker: {} | Size: {} SOL | Price: ${} | Time: {}",
            self.ticker,
            self.size_label(),
            self.price_label(),
            self.time_label()
        )
    }
}

/// Renders an optional amount, falling back to [`FALLBACK`].
pub fn label(value: Option<&Amount>) -> String {
    value.map_or_else(|| FALLBACK.to_string(), Amount::to_string)
}

/// JSON strings render without quotes, anything else as its JSON text.
fn raw_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
