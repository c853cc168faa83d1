//! Incoming feed frame decoding.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::Result;
use crate::error::PumpwatchError;
use crate::models::trade::{TradeData, TradeEvent};

/// Decodes one text frame into the trades it carries.
///
/// Frames without a `data` field (or with `data: null`), such as the
/// subscription acknowledgement, yield no trades. Every decoded trade is
/// stamped with `received_at` rather than any server-side time.
///
/// # Errors
///
/// Returns [`PumpwatchError::Json`] if the frame is not valid JSON, `data`
/// is not an array or an entry is not an object, and
/// [`PumpwatchError::MalformedMessage`] if the frame is not a JSON object.
/// Field values of unexpected types never fail the frame.
pub fn decode_message(text: &str, received_at: DateTime<Utc>) -> Result<Vec<TradeEvent>> {
    let value: serde_json::Value = serde_json::from_str(text)?;

    let serde_json::Value::Object(mut fields) = value else {
        return Err(PumpwatchError::MalformedMessage(format!(
            "expected a JSON object, got: {text}"
        )));
    };

    let data = match fields.remove("data") {
        None | Some(serde_json::Value::Null) => return Ok(Vec::new()),
        Some(data) => data,
    };

    let trades = Vec::<TradeData>::deserialize(data)?;

    Ok(trades
        .into_iter()
        .map(|trade| TradeEvent::from_data(trade, received_at))
        .collect())
}
