use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::app::TextInput;

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Render a text input as spans, with a caret at the cursor position
/// when the field has focus.
pub fn input_spans(input: &TextInput, focused: bool, placeholder: &str) -> Vec<Span<'static>> {
    if focused {
        let (before, after) = input.split_at_cursor();
        return vec![
            Span::styled(before, Style::default().fg(Color::White)),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
            Span::styled(after, Style::default().fg(Color::White)),
        ];
    }

    if input.is_empty() {
        vec![Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        vec![Span::styled(
            input.value(),
            Style::default().fg(Color::White),
        )]
    }
}
