//! Per-session feed listener.
//!
//! [`FeedListener`] connects, sends the token trade subscription, and then
//! forwards decoded trades to the UI until the connection fails, the
//! session is cancelled, or the UI goes away. Failures are reported once
//! and never retried.

use std::sync::Arc;

use chrono::Utc;
use futures_util::{SinkExt, Stream, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};
use tungstenite::Message as WsMessage;

use super::{
    FeedEvent, WsWriter, connect, decode_message, subscribe_token_trades, unsubscribe_token_trades,
};
use crate::PumpwatchError;
use crate::tui::Message;
use crate::tui::app::TrackRequest;

/// Why the reader loop exited.
enum StopReason {
    /// The connection failed or a frame could not be decoded.
    Failed(PumpwatchError),
    /// The session was cancelled by the UI.
    Cancelled,
    /// The message channel to the UI was closed (app shutting down).
    UiClosed,
}

/// Streams trades for one token address into the UI channel.
pub struct FeedListener {
    url: String,
    tls_config: Option<Arc<rustls::ClientConfig>>,
    session: u64,
    address: String,
    tx: mpsc::UnboundedSender<Message>,
}

impl FeedListener {
    /// Creates a listener for the session described by `request`.
    #[must_use]
    pub fn new(
        url: String,
        tls_config: Option<Arc<rustls::ClientConfig>>,
        request: TrackRequest,
        tx: mpsc::UnboundedSender<Message>,
    ) -> Self {
        Self {
            url,
            tls_config,
            session: request.session,
            address: request.address,
            tx,
        }
    }

    /// Returns the session id this listener reports under.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Runs the listener until failure, cancellation, or UI shutdown.
    ///
    /// Resolving `shutdown` (or dropping its sender) cancels the session,
    /// including a connect that is still pending.
    pub async fn run(self, mut shutdown: oneshot::Receiver<()>) {
        info!(
            session = self.session,
            url = %self.url,
            address = %self.address,
            "Connecting to trade feed"
        );

        let connected = tokio::select! {
            result = connect(&self.url, self.tls_config.clone()) => result,
            _ = &mut shutdown => {
                info!(session = self.session, "Tracking cancelled before connect");
                return;
            }
        };

        let (mut write, read) = match connected {
            Ok(pair) => pair,
            Err(e) => return self.fail(e),
        };

        if let Err(e) = subscribe_token_trades(&mut write, &self.address).await {
            return self.fail(e);
        }

        match self.read_loop(read, &mut shutdown).await {
            StopReason::Failed(e) => self.fail(e),
            StopReason::Cancelled => self.close(&mut write).await,
            StopReason::UiClosed => {
                info!(session = self.session, "UI closed, stopping listener");
            }
        }
    }

    /// Reads frames until the stream fails, ends, or the session stops.
    async fn read_loop<S>(&self, mut read: S, shutdown: &mut oneshot::Receiver<()>) -> StopReason
    where
        S: Stream<Item = Result<WsMessage, tungstenite::Error>> + Unpin,
    {
        loop {
            tokio::select! {
                msg = read.next() => {
                    match msg {
                        Some(Ok(WsMessage::Text(text))) => {
                            debug!(session = self.session, "Received: {}", text.as_str());
                            let trades = match decode_message(&text, Utc::now()) {
                                Ok(trades) => trades,
                                Err(e) => return StopReason::Failed(e),
                            };
                            if trades.is_empty() {
                                continue;
                            }
                            let message = Message::Feed {
                                session: self.session,
                                event: FeedEvent::Trades(trades),
                            };
                            if self.tx.send(message).is_err() {
                                return StopReason::UiClosed;
                            }
                        }
                        Some(Ok(WsMessage::Close(frame))) => {
                            warn!(session = self.session, ?frame, "Feed sent close frame");
                            return StopReason::Failed(PumpwatchError::FeedClosed);
                        }
                        Some(Ok(_)) => {} // Binary/Ping/Pong frames
                        Some(Err(e)) => return StopReason::Failed(e.into()),
                        None => return StopReason::Failed(PumpwatchError::FeedClosed),
                    }
                }

                _ = &mut *shutdown => return StopReason::Cancelled,
            }
        }
    }

    /// Logs the failure and reports it to the UI exactly once.
    fn fail(&self, error: PumpwatchError) {
        error!(session = self.session, address = %self.address, "WebSocket error: {error}");
        let _ = self.tx.send(Message::Feed {
            session: self.session,
            event: FeedEvent::Failed(error.to_string()),
        });
    }

    /// Best-effort unsubscribe and close after cancellation.
    async fn close(&self, write: &mut WsWriter) {
        if let Err(e) = unsubscribe_token_trades(write, &self.address).await {
            debug!(session = self.session, "Unsubscribe on cancel failed: {e}");
        }
        if let Err(e) = write.close().await {
            debug!(session = self.session, "Close on cancel failed: {e}");
        }
        info!(session = self.session, "Tracking cancelled");
    }
}

#[cfg(test)]
mod tests {
    use futures_util::stream;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::trade::Amount;

    fn listener() -> (FeedListener, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let request = TrackRequest {
            session: 3,
            address: "Mint111".to_string(),
        };
        let listener = FeedListener::new("ws://127.0.0.1:1".to_string(), None, request, tx);
        (listener, rx)
    }

    fn text(frame: &str) -> Result<WsMessage, tungstenite::Error> {
        Ok(WsMessage::Text(frame.to_string().into()))
    }

    #[tokio::test]
    async fn forwards_trades_in_order_then_fails_on_end_of_stream() {
        let (listener, mut rx) = listener();
        let (_shutdown_tx, mut shutdown) = oneshot::channel();
        let frames = stream::iter(vec![
            text(r#"{"message":"Successfully subscribed to keys."}"#),
            text(r#"{"data":[{"symbol":"A","solAmount":1},{"symbol":"B","solAmount":2}]}"#),
            Ok(WsMessage::Ping(Vec::new().into())),
            text(r#"{"data":[{"symbol":"C","solAmount":3}]}"#),
        ]);

        let reason = listener.read_loop(frames, &mut shutdown).await;
        assert!(matches!(reason, StopReason::Failed(PumpwatchError::FeedClosed)));

        let mut tickers = Vec::new();
        while let Ok(Message::Feed { session, event }) = rx.try_recv() {
            assert_eq!(session, 3);
            let trades = match event {
                FeedEvent::Trades(trades) => trades,
                other => panic!("unexpected event {other:?}"),
            };
            tickers.extend(trades.into_iter().map(|t| {
                let size = t.order_size.as_ref().and_then(Amount::as_decimal);
                (t.ticker, size)
            }));
        }
        assert_eq!(
            tickers,
            vec![
                ("A".to_string(), Some(dec!(1))),
                ("B".to_string(), Some(dec!(2))),
                ("C".to_string(), Some(dec!(3))),
            ]
        );
    }

    #[tokio::test]
    async fn malformed_frame_stops_the_loop() {
        let (listener, mut rx) = listener();
        let (_shutdown_tx, mut shutdown) = oneshot::channel();
        let frames = stream::iter(vec![
            text("not json"),
            text(r#"{"data":[{"symbol":"LATE"}]}"#),
        ]);

        let reason = listener.read_loop(frames, &mut shutdown).await;

        assert!(matches!(reason, StopReason::Failed(PumpwatchError::Json(_))));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn shutdown_signal_cancels() {
        let (listener, _rx) = listener();
        let (shutdown_tx, mut shutdown) = oneshot::channel();
        shutdown_tx.send(()).unwrap();

        let reason = listener
            .read_loop(
                stream::pending::<Result<WsMessage, tungstenite::Error>>(),
                &mut shutdown,
            )
            .await;
        assert!(matches!(reason, StopReason::Cancelled));
    }

    #[tokio::test]
    async fn closed_ui_channel_stops_the_loop() {
        let (listener, rx) = listener();
        drop(rx);
        let (_shutdown_tx, mut shutdown) = oneshot::channel();
        let frames = stream::iter(vec![text(r#"{"data":[{"symbol":"A"}]}"#)]);

        let reason = listener.read_loop(frames, &mut shutdown).await;
        assert!(matches!(reason, StopReason::UiClosed));
    }

    #[tokio::test]
    async fn connection_failure_reports_once() {
        let (listener, mut rx) = listener();
        let (_shutdown_tx, shutdown) = oneshot::channel();

        listener.run(shutdown).await;

        let Ok(Message::Feed { session, event }) = rx.try_recv() else {
            panic!("expected a failure message");
        };
        assert_eq!(session, 3);
        assert!(matches!(event, FeedEvent::Failed(_)));
        assert!(rx.try_recv().is_err());
    }
}
