//! Title line component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, Mode};

/// Renders the application title and the current input mode.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mode = match app.mode {
        Mode::Insert => Span::styled(" INSERT ", Style::default().fg(Color::Black).bg(Color::Cyan)),
        Mode::Normal => Span::styled(" NORMAL ", Style::default().fg(Color::Black).bg(Color::White)),
    };

    let line = Line::from(vec![
        Span::styled(
            " Pump.fun Live Price Tracker ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        mode,
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
