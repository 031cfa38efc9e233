use super::*;
use crate::app::{calendar, filters};

pub fn render_calendar(frame: &mut Frame, app: &App, area: Rect) {
    let grid = calendar::month_grid(app.cal_month);
    let counts = filters::due_counts(&app.tasks);
    let focused = app.focus == Focus::Calendar;

    let mut lines = vec![Line::from(Span::styled(
        " Mo  Tu  We  Th  Fr  Sa  Su",
        Style::default().fg(Color::DarkGray),
    ))];

    // 6 rows of 7, always. Leading and trailing cells belong to the
    // neighboring months.
    for week in grid.chunks(7) {
        let mut spans = Vec::with_capacity(week.len());
        for cell in week {
            let iso = cell.iso();
            let count = counts.get(&iso).copied().unwrap_or(0);
            let is_selected = app.selected_due.as_deref() == Some(iso.as_str());
            let is_cursor = focused && cell.date == app.cal_cursor;

            let marker = if count > 0 { '•' } else { ' ' };
            let text = format!("{:>3}{marker}", cell.date.day());

            let mut style = if !cell.in_month {
                Style::default().fg(Color::DarkGray)
            } else if count > 0 {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            if cell.date == app.today {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            if is_selected {
                style = style.fg(Color::Black).bg(Color::Cyan);
            }
            if is_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    let note = match &app.selected_due {
        Some(day) => format!("Showing tasks due {day} (x clears)"),
        None => "• marks days with due tasks".to_string(),
    };
    lines.push(Line::from(Span::styled(
        note,
        Style::default().fg(Color::DarkGray),
    )));

    let border_color = if focused { Color::White } else { Color::DarkGray };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(
                format!(" {} ", calendar::month_label(app.cal_month)),
                Style::default().fg(Color::White),
            ))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}
