//! Live tests against the public PumpPortal data feed.
//!
//! These tests connect to the real endpoint and require network access.
//! Run with: `cargo test --features integration-tests`

#![cfg(feature = "integration-tests")]

mod common;

use futures_util::StreamExt;
use pumpwatch::config::DEFAULT_WEBSOCKET_URL;
use pumpwatch::feed::{connect, subscribe_token_trades, unsubscribe_token_trades};
use pumpwatch::tls::{TlsMode, build_tls_config};

use common::TEST_ADDRESS;

#[tokio::test]
async fn test_connect_to_feed() {
    let result = connect(DEFAULT_WEBSOCKET_URL, None).await;
    assert!(result.is_ok(), "Failed to connect to the trade feed");
}

#[tokio::test]
async fn test_connect_with_insecure_tls() {
    let tls = build_tls_config(&TlsMode::Insecure).expect("failed to build TLS config");
    let result = connect(DEFAULT_WEBSOCKET_URL, tls).await;
    assert!(result.is_ok(), "Failed to connect with insecure TLS");
}

#[tokio::test]
async fn test_subscribe_is_acknowledged() {
    let (mut write, mut read) = connect(DEFAULT_WEBSOCKET_URL, None)
        .await
        .expect("Failed to connect");

    subscribe_token_trades(&mut write, TEST_ADDRESS)
        .await
        .expect("Failed to subscribe");

    let timeout = tokio::time::timeout(tokio::time::Duration::from_secs(10), async {
        while let Some(msg) = read.next().await {
            if let Ok(tungstenite::Message::Text(text)) = msg {
                return Some(text.to_string());
            }
        }
        None
    });

    let first = timeout.await.expect("Timeout waiting for a reply");
    assert!(first.is_some(), "Feed closed without replying");

    unsubscribe_token_trades(&mut write, TEST_ADDRESS)
        .await
        .expect("Failed to unsubscribe");
}
