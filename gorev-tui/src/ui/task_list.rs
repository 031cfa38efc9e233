use super::*;
use crate::app::filters;

pub fn render_task_list(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible();
    let today = app.today_iso();

    let border_color = if app.focus == Focus::List {
        Color::White
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" Tasks ({} shown) ", visible.len()),
            Style::default().fg(Color::White),
        ))
        .padding(Padding::horizontal(1));

    if visible.is_empty() {
        let hint = if app.loading {
            "Loading…"
        } else if app.selected_due.is_some() {
            "Nothing due on the selected day. Press x to clear the day filter."
        } else if !app.search_input.value().trim().is_empty() {
            "No tasks match the search."
        } else if app.filter != StatusFilter::All {
            "Nothing here under this filter."
        } else {
            "No tasks yet. Press n to add one."
        };
        let empty_msg = Paragraph::new(hint)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty_msg, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|t| {
            let mut spans = Vec::new();

            if app.dragging_id == Some(t.id) {
                spans.push(Span::styled("↕ ", Style::default().fg(Color::Yellow)));
            } else {
                spans.push(Span::raw("  "));
            }

            spans.push(Span::styled(
                if t.completed { "[x] " } else { "[ ] " },
                Style::default().fg(if t.completed {
                    Color::Green
                } else {
                    Color::White
                }),
            ));

            spans.push(Span::styled(
                t.title.clone(),
                if t.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                },
            ));

            if let Some(due) = &t.due_date {
                if !t.completed && filters::is_overdue(t, &today) {
                    spans.push(Span::styled(
                        format!("  {due} (overdue)"),
                        Style::default().fg(Color::Red),
                    ));
                } else {
                    spans.push(Span::styled(
                        format!("  {due}"),
                        Style::default().fg(Color::Cyan),
                    ));
                }
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.selected_index.min(visible.len() - 1)));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut state);
}
