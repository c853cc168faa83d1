//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::app::{App, Mode};
use super::components::{address_input, header, price_label, status_bar, trade_list};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Status bar
            Constraint::Length(3), // Address entry
            Constraint::Length(3), // Status / price label
            Constraint::Min(3),    // Trades
            Constraint::Length(1), // Keybindings help
        ])
        .split(frame.area());

    header::render(frame, layout[0], app);
    status_bar::render(frame, layout[1], app);
    address_input::render(frame, layout[2], app);
    price_label::render(frame, layout[3], app);
    trade_list::render(frame, layout[4], app);
    render_keybindings(frame, layout[5], app);
}

fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let keys: &[(&str, &str)] = match app.mode {
        Mode::Insert => &[("Enter", "track"), ("Esc", "trades"), ("Ctrl-C", "quit")],
        Mode::Normal => &[
            ("Enter", "track"),
            ("i", "edit"),
            ("j/k", "scroll"),
            ("g/G", "top/bottom"),
            ("q", "quit"),
        ],
    };

    let mut spans = Vec::with_capacity(keys.len() * 2);
    for (key, action) in keys {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(Color::Black).bg(Color::DarkGray),
        ));
        spans.push(Span::raw(format!(" {action} ")));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
