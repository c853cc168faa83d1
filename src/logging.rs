//! Tracing subscriber setup.
//!
//! The terminal is owned by the TUI, so log output goes to a file instead
//! of stdout.

use std::fs::OpenOptions;
use std::sync::Mutex;

use crate::config::LogConfig;
use crate::{PumpwatchError, Result};

/// Installs the global tracing subscriber, appending to the configured
/// log file.
///
/// # Errors
///
/// Returns [`PumpwatchError::Io`] if the log file cannot be opened or a
/// global subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|e| {
            PumpwatchError::Io(format!(
                "failed to open log file {}: {e}",
                config.file.display()
            ))
        })?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.level)
        .try_init()
        .map_err(|e| PumpwatchError::Io(format!("failed to install tracing subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;

    #[test]
    fn writes_to_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            file: dir.path().join("pumpwatch.log"),
            level: Level::INFO,
        };

        init(&config).unwrap();
        tracing::info!(session = 7, "log line from test");
        tracing::debug!("filtered out");

        let contents = std::fs::read_to_string(&config.file).unwrap();
        assert!(contents.contains("log line from test"));
        assert!(contents.contains("session=7"));
        assert!(!contents.contains("filtered out"));
    }

    #[test]
    fn unopenable_log_file() {
        let config = LogConfig {
            file: "/nonexistent/dir/pumpwatch.log".into(),
            level: Level::INFO,
        };
        let err = init(&config).unwrap_err();
        assert!(err.to_string().contains("failed to open log file"));
    }
}
