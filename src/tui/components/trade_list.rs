//! Scrollable list of received trades.

use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::models::trade::TradeEvent;
use crate::tui::app::{App, Mode};

/// Renders the visible window of trade rows with a scrollbar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let following = app.scroll_back == 0;
    let title = if following {
        format!(" Trades ({}) ", app.trades.len())
    } else {
        format!(" Trades ({}) [SCROLLED] ", app.trades.len())
    };
    let border_style = if app.mode == Mode::Normal {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = inner.height as usize;
    app.trade_viewport.set(height);
    let visible = app.visible_range(height);

    if app.trades.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No trades yet",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(hint, inner);
        return;
    }

    let lines: Vec<Line> = app.trades[visible.clone()].iter().map(trade_line).collect();
    frame.render_widget(Paragraph::new(lines), inner);

    if app.trades.len() > height {
        let mut state = ScrollbarState::new(app.trades.len().saturating_sub(height))
            .position(visible.start);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut state,
        );
    }
}

/// Formats one trade as a styled row.
fn trade_line(trade: &TradeEvent) -> Line<'static> {
    Line::from(vec![
        Span::raw("Ticker: "),
        Span::styled(
            trade.ticker.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | Size: "),
        Span::styled(
            format!("{} SOL", trade.size_label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | Price: "),
        Span::styled(
            format!("${}", trade.price_label()),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!(" | Time: {}", trade.time_label()),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}
