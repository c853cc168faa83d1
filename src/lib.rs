//! Live trade tracker for a single pump.fun token.
//!
//! Subscribes to the PumpPortal trade feed for one token mint address and
//! renders each decoded trade as a row in a terminal UI, alongside the
//! latest traded price.

pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod models;
pub mod tls;
pub mod tui;

pub use error::{PumpwatchError, Result};
