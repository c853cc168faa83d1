//! Crate-level error types.
//!
//! [`PumpwatchError`] gathers every failure source (configuration, TLS,
//! WebSocket, JSON, terminal) behind one enum so the feed listener can log
//! a single error value and the `?` operator works across module seams.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PumpwatchError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum PumpwatchError {
    /// An environment variable held a value that could not be used.
    #[error("configuration error: {0}")]
    Config(String),

    /// A WebSocket operation (connect, send, receive) failed.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A feed frame was valid JSON but not shaped like a feed message.
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// The TLS client configuration could not be built.
    #[error("tls error: {0}")]
    Tls(String),

    /// Terminal or filesystem I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// The feed closed the connection.
    #[error("feed closed the connection")]
    FeedClosed,
}
