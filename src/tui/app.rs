//! Application state for the TUI.

use std::cell::Cell;
use std::ops::Range;

use super::input::TextInput;
use crate::models::trade::{self, Amount, TradeEvent};
use crate::tls::TlsMode;

/// Central application state container.
///
/// Only the UI task mutates this; the feed listener reaches it through
/// [`Message`](super::Message) values applied by [`update`](super::event::update).
pub struct App {
    // -- Input State --
    /// Token mint address entry field.
    pub address_input: TextInput,
    /// Current input mode.
    pub mode: Mode,

    // -- Feed State --
    /// Status/price label state.
    pub status: Status,
    /// Address of the current (or last) tracking session.
    pub tracked_address: Option<String>,
    /// Id of the session whose messages are accepted, if one is running.
    pub active_session: Option<u64>,
    /// Reason of the most recent session failure.
    pub last_error: Option<String>,
    /// TLS trust mode of the feed connection.
    pub tls_mode: TlsMode,

    // -- Trade List --
    /// Every trade received, in arrival order.
    pub trades: Vec<TradeEvent>,
    /// Rows scrolled back from the tail; `0` follows new trades.
    pub scroll_back: usize,
    /// Trade panel height from the last render.
    pub trade_viewport: Cell<usize>,

    // -- Internal --
    next_session: u64,
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates a new App instance with default state.
    pub fn new() -> Self {
        Self {
            address_input: TextInput::new(),
            mode: Mode::Insert,

            status: Status::Idle,
            tracked_address: None,
            active_session: None,
            last_error: None,
            tls_mode: TlsMode::default(),

            trades: Vec::new(),
            scroll_back: 0,
            trade_viewport: Cell::new(0),

            next_session: 1,
            should_quit: false,
        }
    }

    /// Validates the entered address and opens a new tracking session.
    ///
    /// Returns `None` (and shows the invalid-address status) when the
    /// trimmed entry is empty. Otherwise the status switches to connecting,
    /// any earlier session stops being accepted, and the returned request
    /// must be handed to a feed listener.
    pub fn start_tracking(&mut self) -> Option<TrackRequest> {
        let address = self.address_input.as_str().trim().to_string();
        if address.is_empty() {
            self.status = Status::InvalidAddress;
            return None;
        }

        let session = self.next_session;
        self.next_session += 1;

        self.status = Status::Connecting;
        self.active_session = Some(session);
        self.tracked_address = Some(address.clone());
        self.last_error = None;

        Some(TrackRequest { session, address })
    }

    /// Returns `true` if messages from `session` should be applied.
    pub fn is_active_session(&self, session: u64) -> bool {
        self.active_session == Some(session)
    }

    /// Shows the latest traded price in the status label.
    pub fn display_price(&mut self, price: Option<Amount>) {
        self.status = Status::Streaming { price };
    }

    /// Appends one trade row.
    ///
    /// A scrolled-back viewport stays on the same rows; otherwise the view
    /// keeps following the newest trade.
    pub fn display_trade(&mut self, trade: TradeEvent) {
        self.trades.push(trade);
        if self.scroll_back > 0 {
            self.scroll_back += 1;
        }
    }

    /// Ends the active session after a feed failure.
    pub fn session_failed(&mut self, reason: String) {
        self.status = Status::ConnectionFailed;
        self.active_session = None;
        self.last_error = Some(reason);
    }

    /// Scrolls the trade list towards older rows.
    pub fn scroll_up(&mut self, rows: usize) {
        let max = self.trades.len().saturating_sub(self.trade_viewport.get());
        self.scroll_back = (self.scroll_back + rows).min(max);
    }

    /// Scrolls the trade list towards newer rows.
    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(rows);
    }

    /// Jumps to the oldest rows.
    pub fn scroll_to_top(&mut self) {
        self.scroll_up(self.trades.len());
    }

    /// Jumps to the newest row and resumes following.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_back = 0;
    }

    /// Returns the indices of the rows visible in a panel of `height` rows.
    pub fn visible_range(&self, height: usize) -> Range<usize> {
        let len = self.trades.len();
        let end = len
            .saturating_sub(self.scroll_back)
            .max(height.min(len));
        end.saturating_sub(height)..end
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// A validated request to start tracking one address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackRequest {
    pub session: u64,
    pub address: String,
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Keys edit the address field.
    #[default]
    Insert,
}

/// State of the status/price label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Connecting,
    /// Trades are arriving; holds the newest price.
    Streaming { price: Option<Amount> },
    InvalidAddress,
    ConnectionFailed,
}

impl Status {
    /// Returns the label text.
    pub fn label(&self) -> String {
        match self {
            Status::Idle => "Waiting for price updates...".to_string(),
            Status::Connecting => "Connecting to Pump.fun...".to_string(),
            Status::Streaming { price } => {
                format!("Latest Price: ${}", trade::label(price.as_ref()))
            }
            Status::InvalidAddress => "Please enter a valid token address.".to_string(),
            Status::ConnectionFailed => "Error connecting to Pump.fun".to_string(),
        }
    }

    /// Returns `true` for the error states.
    pub fn is_error(&self) -> bool {
        matches!(self, Status::InvalidAddress | Status::ConnectionFailed)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use super::*;

    fn trade(ticker: &str) -> TradeEvent {
        TradeEvent {
            ticker: ticker.to_string(),
            order_size: None,
            price: None,
            timestamp: Utc::now(),
        }
    }

    fn app_with_input(text: &str) -> App {
        let mut app = App::new();
        for c in text.chars() {
            app.address_input.insert(c);
        }
        app
    }

    #[test]
    fn whitespace_address_is_rejected() {
        let mut app = app_with_input("   ");
        assert_eq!(app.start_tracking(), None);
        assert_eq!(app.status, Status::InvalidAddress);
        assert_eq!(app.active_session, None);
    }

    #[test]
    fn start_tracking_trims_and_allocates_sessions() {
        let mut app = app_with_input("  Mint111 ");
        let first = app.start_tracking().unwrap();
        assert_eq!(first.address, "Mint111");
        assert_eq!(app.status, Status::Connecting);

        let second = app.start_tracking().unwrap();
        assert!(second.session > first.session);
        assert!(app.is_active_session(second.session));
        assert!(!app.is_active_session(first.session));
    }

    #[test]
    fn status_labels() {
        assert_eq!(Status::Idle.label(), "Waiting for price updates...");
        assert_eq!(
            Status::Streaming {
                price: Some(Amount::Number(dec!(0.002)))
            }
            .label(),
            "Latest Price: $0.002"
        );
        assert_eq!(
            Status::Streaming { price: None }.label(),
            "Latest Price: $N/A"
        );
        assert!(Status::ConnectionFailed.is_error());
        assert!(!Status::Connecting.is_error());
    }

    #[test]
    fn follows_tail_by_default() {
        let mut app = App::new();
        for i in 0..10 {
            app.display_trade(trade(&i.to_string()));
        }
        assert_eq!(app.visible_range(4), 6..10);
        assert_eq!(app.visible_range(20), 0..10);
    }

    #[test]
    fn scrolled_view_stays_anchored() {
        let mut app = App::new();
        app.trade_viewport.set(4);
        for i in 0..10 {
            app.display_trade(trade(&i.to_string()));
        }

        app.scroll_up(3);
        assert_eq!(app.visible_range(4), 3..7);

        app.display_trade(trade("new"));
        assert_eq!(app.visible_range(4), 3..7);

        app.scroll_to_top();
        assert_eq!(app.visible_range(4), 0..4);

        app.scroll_to_bottom();
        assert_eq!(app.visible_range(4), 7..11);
    }
}
