//! Cancellable handle for a running feed listener.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::FeedListener;

/// How long [`FeedSession::shutdown`] waits for a graceful unsubscribe.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Owns the task of one tracking session.
///
/// Dropping the handle signals the listener to stop, so replacing the
/// session stored by the UI loop never leaves a runaway listener behind.
pub struct FeedSession {
    id: u64,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl FeedSession {
    /// Spawns `listener` on the current tokio runtime.
    #[must_use]
    pub fn spawn(listener: FeedListener) -> Self {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let id = listener.session();
        let handle = tokio::spawn(listener.run(shutdown_rx));
        info!(session = id, "Started tracking session");

        Self {
            id,
            shutdown: Some(shutdown_tx),
            handle,
        }
    }

    /// Returns the session id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Signals the listener to stop without waiting for it.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            // Err means the listener already ended.
            let _ = tx.send(());
            info!(session = self.id, "Cancelled tracking session");
        }
    }

    /// Signals the listener to stop and waits for it to unsubscribe,
    /// aborting the task if it does not finish within the grace period.
    pub async fn shutdown(mut self) {
        self.cancel();
        if tokio::time::timeout(SHUTDOWN_GRACE, &mut self.handle)
            .await
            .is_err()
        {
            warn!(session = self.id, "Listener did not stop in time, aborting");
            self.handle.abort();
        }
    }
}

impl Drop for FeedSession {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::tui::app::TrackRequest;

    fn request(session: u64) -> TrackRequest {
        TrackRequest {
            session,
            address: "Mint111".to_string(),
        }
    }

    #[tokio::test]
    async fn shutdown_cancels_pending_connect() {
        // A listening socket that never completes the websocket handshake.
        let server = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}", server.local_addr().unwrap());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let session = FeedSession::spawn(FeedListener::new(url, None, request(1), tx));
        assert_eq!(session.id(), 1);
        let (_socket, _) = server.accept().await.unwrap();

        session.shutdown().await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn failed_listener_finishes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = FeedSession::spawn(FeedListener::new(
            "ws://127.0.0.1:1".to_string(),
            None,
            request(2),
            tx,
        ));

        assert!(rx.recv().await.is_some());
        // The sender is dropped with the task.
        let closed = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap();
        assert!(closed.is_none());
        drop(session);
    }
}
