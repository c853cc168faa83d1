//! Shared test utilities: a local stand-in for the trade feed.

#![allow(dead_code)]

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tungstenite::Message;

/// Token address used across tests.
pub const TEST_ADDRESS: &str = "7GCihgDB8fe6KNjn2MYtkzZcRjQy3t9GHdC8uHYmW2hr";

pub const TRADE_JSON: &str = include_str!("../fixtures/trade.json");
pub const TRADE_MISSING_SYMBOL_JSON: &str = include_str!("../fixtures/trade_missing_symbol.json");
pub const TRADE_BATCH_JSON: &str = include_str!("../fixtures/trade_batch.json");
pub const SUBSCRIBED_JSON: &str = include_str!("../fixtures/subscribed.json");

/// How the local feed ends the connection after sending its frames.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum AfterFrames {
    /// Send a close frame straight away.
    Close,
    /// Keep reading until the client closes.
    HoldOpen,
}

/// Starts a one-connection websocket server on localhost.
///
/// The server waits for the client's first frame, replies with `frames`,
/// then behaves as `after` says. The handle resolves to every text frame
/// the client sent.
pub async fn spawn_feed_server(
    frames: Vec<&'static str>,
    after: AfterFrames,
) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test server");
    let url = format!("ws://{}", listener.local_addr().expect("no local addr"));

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept failed");
        let mut ws = tokio_tungstenite::accept_async(stream)
            .await
            .expect("websocket handshake failed");

        let mut received = Vec::new();
        if let Some(Ok(Message::Text(text))) = ws.next().await {
            received.push(text.to_string());
        }

        for frame in frames {
            ws.send(Message::Text(frame.to_string().into()))
                .await
                .expect("failed to send frame");
        }

        match after {
            AfterFrames::Close => {
                let _ = ws.close(None).await;
            }
            AfterFrames::HoldOpen => {
                while let Some(Ok(msg)) = ws.next().await {
                    if let Message::Text(text) = msg {
                        received.push(text.to_string());
                    }
                }
            }
        }

        received
    });

    (url, handle)
}

/// Returns a localhost URL nothing is listening on.
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind");
    let addr = listener.local_addr().expect("no local addr");
    drop(listener);
    format!("ws://{addr}")
}
