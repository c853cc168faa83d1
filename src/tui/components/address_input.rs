//! Token mint address entry field.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::{App, Mode};

/// Renders the address field and places the cursor while editing.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.mode == Mode::Insert;
    let border_style = if editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(" Enter Token Mint Address ")
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);

    let input = &app.address_input;
    // Keep the cursor visible when the address is wider than the field.
    let cursor = u16::try_from(input.cursor_width()).unwrap_or(u16::MAX);
    let scroll = cursor.saturating_sub(inner.width.saturating_sub(1));

    let para = Paragraph::new(input.as_str())
        .block(block)
        .scroll((0, scroll));
    frame.render_widget(para, area);

    if editing {
        let x = inner.x.saturating_add(cursor - scroll);
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend, layout::Position};

    use super::*;

    fn cursor_after(text: &str) -> Position {
        let mut app = App::new();
        app.address_input.insert_str(text);
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &app))
            .unwrap();
        terminal.get_cursor_position().unwrap()
    }

    #[test]
    fn cursor_follows_short_address() {
        assert_eq!(cursor_after("Mint"), Position::new(5, 1));
    }

    #[test]
    fn cursor_stays_inside_field_for_long_paste() {
        let pasted = "x".repeat(70_000);
        assert_eq!(cursor_after(&pasted), Position::new(38, 1));
    }
}
