//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, Status};

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (session_label, session_color) = match (&app.status, app.active_session) {
        (Status::ConnectionFailed, _) => ("Offline", Color::Red),
        (_, None) => ("Idle", Color::White),
        (Status::Connecting, Some(_)) => ("Connecting...", Color::Yellow),
        (_, Some(_)) => ("Online", Color::Green),
    };

    let tls_style = if app.tls_mode.is_insecure() {
        Style::default().fg(Color::White).bg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let address_span = match app.tracked_address {
        Some(ref address) => Span::styled(format!(" {address} "), Style::default().fg(Color::Cyan)),
        None => Span::raw(""),
    };

    let error_span = match app.last_error {
        Some(ref error) => Span::styled(format!(" {error} "), Style::default().fg(Color::Red)),
        None => Span::raw(""),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {session_label} "),
            Style::default().fg(session_color),
        ),
        Span::raw("│"),
        Span::styled(format!(" {} ", app.tls_mode.label()), tls_style),
        Span::raw("│"),
        Span::raw(format!(" {} trades ", app.trades.len())),
        Span::raw("│"),
        address_span,
        error_span,
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
