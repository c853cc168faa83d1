//! Async WebSocket client for the PumpPortal trade feed.
//!
//! This module is organized by concern:
//! - [`subscription`] - token trade subscribe/unsubscribe frames
//! - [`handler`] - decoding of incoming frames into trade events
//! - [`listener`] - the per-session connect/subscribe/read task
//! - [`session`] - the cancellable handle owning a running listener

mod handler;
mod listener;
mod session;
mod subscription;

use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream::{SplitSink, SplitStream};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    Connector, MaybeTlsStream, WebSocketStream, connect_async, connect_async_tls_with_config,
};
use tracing::info;
use tungstenite::Message;

use crate::Result;
use crate::models::trade::TradeEvent;

pub use handler::decode_message;
pub use listener::FeedListener;
pub use session::FeedSession;
pub use subscription::{subscribe_token_trades, unsubscribe_token_trades};

/// Write half of a feed connection.
pub type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Read half of a feed connection.
pub type WsReader = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// What a listener reports back to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// Trades decoded from one frame, in arrival order.
    Trades(Vec<TradeEvent>),
    /// The session ended with an error; no more events follow.
    Failed(String),
}

/// Establishes a WebSocket connection to the given URL.
///
/// When `tls` is `None` the connector built into tokio-tungstenite (webpki
/// roots) is used for `wss://` URLs.
///
/// # Errors
///
/// Returns a [`PumpwatchError`](crate::PumpwatchError) if the connection or
/// TLS handshake fails.
pub async fn connect(
    url: &str,
    tls: Option<Arc<rustls::ClientConfig>>,
) -> Result<(WsWriter, WsReader)> {
    let (ws_stream, _) = match tls {
        Some(config) => {
            connect_async_tls_with_config(url, None, false, Some(Connector::Rustls(config)))
                .await?
        }
        None => connect_async(url).await?,
    };
    info!(url, "WebSocket handshake completed");

    Ok(ws_stream.split())
}
