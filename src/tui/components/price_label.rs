//! Status and latest price label.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::{App, Status};

/// Renders the status label, colored by state.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let color = match app.status {
        Status::Idle => Color::White,
        Status::Connecting => Color::Yellow,
        Status::Streaming { .. } => Color::Green,
        Status::InvalidAddress | Status::ConnectionFailed => Color::Red,
    };

    let para = Paragraph::new(app.status.label())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(para, area);
}
