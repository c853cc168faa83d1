//! Terminal User Interface for the trade tracker.
//!
//! Provides a Ratatui-based TUI with an address entry field, a status and
//! price label, and a scrollable list of received trades.

pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message, update};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
