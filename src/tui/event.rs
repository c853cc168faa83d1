//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use tokio::sync::mpsc;
use tracing::debug;

use super::app::{App, Mode, TrackRequest};
use crate::feed::FeedEvent;

/// Rows moved by PageUp/PageDown.
const PAGE_ROWS: usize = 10;

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Text was pasted (bracketed paste).
    Paste(String),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// Output of the feed listener for a tracking session.
    Feed { session: u64, event: FeedEvent },
}

/// Actions that require external handling.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// Replace the running session with a listener for this request.
    StartTracking(TrackRequest),
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Paste(text))) => {
                    if tx.send(Message::Input(Event::Paste(text))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Feed { session, event } => {
            if !app.is_active_session(session) {
                debug!(session, "Dropping message from inactive session");
                return None;
            }
            match event {
                FeedEvent::Trades(trades) => {
                    let price = trades.last().map(|t| t.price.clone());
                    for trade in trades {
                        app.display_trade(trade);
                    }
                    if let Some(price) = price {
                        app.display_price(price);
                    }
                }
                FeedEvent::Failed(reason) => app.session_failed(reason),
            }
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Paste(text) => {
            app.address_input.insert_str(&text);
            app.mode = Mode::Insert;
            None
        }
        Event::Resize(_, _) | Event::Tick => None,
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => handle_insert_mode(app, key),
    }
}

/// Handles keys in normal mode (trade list navigation).
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('i') | KeyCode::Tab => app.mode = Mode::Insert,
        KeyCode::Enter => return start_tracking(app),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(PAGE_ROWS),
        KeyCode::PageDown => app.scroll_down(PAGE_ROWS),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),
        _ => {}
    }
    None
}

/// Handles keys in insert mode (address entry).
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => return start_tracking(app),
        KeyCode::Esc | KeyCode::Tab => app.mode = Mode::Normal,
        KeyCode::Char(c) => app.address_input.insert(c),
        KeyCode::Backspace => app.address_input.backspace(),
        KeyCode::Delete => app.address_input.delete(),
        KeyCode::Left => app.address_input.move_left(),
        KeyCode::Right => app.address_input.move_right(),
        KeyCode::Home => app.address_input.move_home(),
        KeyCode::End => app.address_input.move_end(),
        _ => {}
    }
    None
}

/// Starts tracking the entered address; leaves insert mode on success.
fn start_tracking(app: &mut App) -> Option<Action> {
    let request = app.start_tracking()?;
    app.mode = Mode::Normal;
    Some(Action::StartTracking(request))
}
