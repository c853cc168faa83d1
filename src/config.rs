//! Application configuration loaded from environment variables.
//!
//! Every setting is optional:
//! - `PUMPWATCH_WEBSOCKET_URL` — feed endpoint (defaults to PumpPortal)
//! - `PUMPWATCH_INSECURE_TLS` — disables certificate validation when true
//! - `PUMPWATCH_CA_CERT` — PEM bundle that replaces the default trust roots
//! - `PUMPWATCH_LOG_FILE` — where tracing output is written
//! - `PUMPWATCH_LOG_LEVEL` — maximum tracing level
//!
//! Empty values are treated as absent.

use std::path::PathBuf;

use tracing::Level;

use crate::PumpwatchError;
use crate::tls::TlsMode;

/// Default public PumpPortal data endpoint.
pub const DEFAULT_WEBSOCKET_URL: &str = "wss://pumpportal.fun/api/data";

/// Default log file, relative to the working directory.
const DEFAULT_LOG_FILE: &str = "pumpwatch.log";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub logging: LogConfig,
}

/// Trade feed connection settings.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub websocket_url: String,
    pub tls: TlsMode,
}

/// Tracing output settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub file: PathBuf,
    pub level: Level,
}

/// Loads the application configuration from the process environment.
///
/// # Errors
///
/// Returns [`PumpwatchError::Config`] if any variable holds an unusable
/// value; see [`load_config`].
pub fn fetch_config() -> crate::Result<AppConfig> {
    load_config(|name| std::env::var(name).ok())
}

/// Builds the configuration from an arbitrary variable lookup.
///
/// # Errors
///
/// Returns [`PumpwatchError::Config`] if the URL is not a `ws://` or
/// `wss://` URL, if `PUMPWATCH_INSECURE_TLS` is not a boolean, if the log
/// level is unknown, or if insecure mode and a pinned CA are both
/// requested.
pub fn load_config<F>(lookup: F) -> crate::Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|s| !s.is_empty());

    let websocket_url =
        var("PUMPWATCH_WEBSOCKET_URL").unwrap_or_else(|| DEFAULT_WEBSOCKET_URL.to_string());
    if !(websocket_url.starts_with("wss://") || websocket_url.starts_with("ws://")) {
        return Err(PumpwatchError::Config(format!(
            "PUMPWATCH_WEBSOCKET_URL must start with ws:// or wss://, got {websocket_url}"
        )));
    }

    let insecure = match var("PUMPWATCH_INSECURE_TLS") {
        Some(value) => parse_bool("PUMPWATCH_INSECURE_TLS", &value)?,
        None => false,
    };
    let ca_cert = var("PUMPWATCH_CA_CERT").map(PathBuf::from);

    let tls = match (insecure, ca_cert) {
        (true, Some(_)) => {
            return Err(PumpwatchError::Config(
                "PUMPWATCH_INSECURE_TLS and PUMPWATCH_CA_CERT cannot be combined".to_string(),
            ));
        }
        (true, None) => TlsMode::Insecure,
        (false, Some(path)) => TlsMode::Pinned(path),
        (false, None) => TlsMode::Verified,
    };

    let file = var("PUMPWATCH_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let level = match var("PUMPWATCH_LOG_LEVEL") {
        Some(value) => value.parse::<Level>().map_err(|_| {
            PumpwatchError::Config(format!("PUMPWATCH_LOG_LEVEL has unknown level {value}"))
        })?,
        None => Level::INFO,
    };

    Ok(AppConfig {
        feed: FeedConfig { websocket_url, tls },
        logging: LogConfig { file, level },
    })
}

fn parse_bool(name: &str, value: &str) -> crate::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(PumpwatchError::Config(format!(
            "{name} must be a boolean, got {other}"
        ))),
    }
}
