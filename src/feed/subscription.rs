//! Token trade subscription operations.

use futures_util::SinkExt;
use tracing::{debug, info};
use tungstenite::Message;

use super::WsWriter;
use crate::Result;
use crate::models::TokenTradeRequest;

/// Subscribes to the trade stream of one token address.
///
/// # Errors
///
/// Returns a [`PumpwatchError`](crate::PumpwatchError) if sending the
/// subscription message fails.
pub async fn subscribe_token_trades(write: &mut WsWriter, address: &str) -> Result<()> {
    send(write, &TokenTradeRequest::subscribe(address)).await?;
    info!(address, "Subscribed to token trades");

    Ok(())
}

/// Unsubscribes from the trade stream of one token address.
///
/// # Errors
///
/// Returns a [`PumpwatchError`](crate::PumpwatchError) if sending the
/// unsubscribe message fails.
pub async fn unsubscribe_token_trades(write: &mut WsWriter, address: &str) -> Result<()> {
    send(write, &TokenTradeRequest::unsubscribe(address)).await?;
    info!(address, "Unsubscribed from token trades");

    Ok(())
}

async fn send(write: &mut WsWriter, request: &TokenTradeRequest) -> Result<()> {
    let json = serde_json::to_string(request)?;
    debug!("Sending {} request: {}", request.method(), json);
    write.send(Message::Text(json.into())).await?;

    Ok(())
}
