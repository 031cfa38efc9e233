use super::utils::{centered_rect, input_spans};
use super::*;
use crate::app::EditField;

pub fn render_delete_confirm(frame: &mut Frame, app: &App) {
    let Some(id) = app.delete_pending else {
        return;
    };
    let title = app
        .tasks
        .get(id)
        .map(|t| t.title.clone())
        .unwrap_or_default();

    let area = centered_rect(52, 8, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(title, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] Yes", Style::default().fg(Color::Red)),
            Span::raw("    "),
            Span::styled("[n] No", Style::default().fg(Color::White)),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Delete task? ")
                .padding(Padding::horizontal(1)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

pub fn render_editor(frame: &mut Frame, app: &App) {
    let Some(editor) = &app.editor else {
        return;
    };

    let area = centered_rect(60, 11, frame.area());
    frame.render_widget(Clear, area);

    let title_focused = editor.focused == EditField::Title;
    let due_focused = editor.focused == EditField::Due;

    let mut title_spans = vec![Span::styled(
        "Title: ",
        Style::default().fg(if title_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        }),
    )];
    title_spans.extend(input_spans(&editor.title, title_focused, ""));

    let mut due_spans = vec![Span::styled(
        "Due:   ",
        Style::default().fg(if due_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        }),
    )];
    due_spans.extend(input_spans(&editor.due, due_focused, "YYYY-MM-DD"));

    let mut lines = vec![
        Line::from(""),
        Line::from(title_spans),
        Line::from(due_spans),
        Line::from(""),
        Line::from(Span::styled(
            "Leave the due date empty to clear it.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    lines.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(": Switch field  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(": Save  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(": Cancel"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(
                    " Edit task ",
                    Style::default().fg(Color::Yellow),
                ))
                .padding(Padding::horizontal(2)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}
