use crate::app::{App, Focus, SessionState, StatusFilter};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

mod calendar_view;
mod dialogs;
mod task_list;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    // Once the session has ended the task data is gone; nothing below
    // this screen is worth drawing.
    if app.session == SessionState::Ended {
        render_signed_out(frame, app);
        return;
    }

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header stats
            Constraint::Length(3), // new task form
            Constraint::Length(1), // filter line
            Constraint::Min(0),    // task list + calendar
            Constraint::Length(2), // error/status + controls
        ])
        .split(frame.area());

    render_header(frame, app, root[0]);
    render_new_task_form(frame, app, root[1]);
    render_filter_line(frame, app, root[2]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(36)])
        .split(root[3]);

    task_list::render_task_list(frame, app, body[0]);
    calendar_view::render_calendar(frame, app, body[1]);

    render_footer(frame, app, root[4]);

    // Overlays render on top of the main layout
    if app.editor.is_some() {
        dialogs::render_editor(frame, app);
    }
    if app.delete_pending.is_some() {
        dialogs::render_delete_confirm(frame, app);
    }
}

fn render_signed_out(frame: &mut Frame, app: &App) {
    let area = utils::centered_rect(56, 8, frame.area());

    let mut lines = vec![Line::from("")];
    if let Some(message) = &app.error {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "You are signed out.",
            Style::default().fg(Color::White),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(": Quit, then run "),
        Span::styled("gorev-tui login", Style::default().fg(Color::Yellow)),
        Span::raw(" to sign in"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Signed out ")
                .padding(Padding::horizontal(1)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let total = app.tasks.len();
    let active = app.tasks.active_count();
    let done = app.tasks.completed_count();

    let mut spans = vec![
        Span::styled(
            " gorev ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {total} total · {active} active · {done} done"),
            Style::default().fg(Color::White),
        ),
    ];
    if app.loading {
        spans.push(Span::styled(
            "  loading…",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

fn render_new_task_form(frame: &mut Frame, app: &App, area: Rect) {
    let title_focused = app.focus == Focus::NewTitle;
    let due_focused = app.focus == Focus::NewDue;
    let form_focused = title_focused || due_focused;

    let mut spans = vec![Span::styled(
        "Title: ",
        Style::default().fg(if title_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        }),
    )];
    spans.extend(utils::input_spans(
        &app.new_title,
        title_focused,
        "what needs doing?",
    ));
    spans.push(Span::raw("   "));
    spans.push(Span::styled(
        "Due: ",
        Style::default().fg(if due_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        }),
    ));
    spans.extend(utils::input_spans(&app.new_due, due_focused, "YYYY-MM-DD"));

    let border_color = if form_focused {
        Color::White
    } else {
        Color::DarkGray
    };
    let form = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(
                " New task ",
                Style::default().fg(Color::White),
            ))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(form, area);
}

fn render_filter_line(frame: &mut Frame, app: &App, area: Rect) {
    let search_focused = app.focus == Focus::Search;
    let query = app.search_input.value();

    let mut spans = vec![
        Span::styled(" Filter: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.filter.label(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Search: ", Style::default().fg(Color::DarkGray)),
    ];
    if search_focused {
        spans.extend(utils::input_spans(&app.search_input, true, ""));
    } else if query.trim().is_empty() {
        spans.push(Span::styled("-", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(query, Style::default().fg(Color::White)));
    }
    if let Some(day) = &app.selected_due {
        spans.push(Span::styled("   Day: ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            day.clone(),
            Style::default().fg(Color::Cyan),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    // Errors persist until replaced or cleared; the toast fades on its own.
    let message = if let Some(error) = &app.error {
        Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(status) = &app.status_message {
        Line::from(Span::styled(
            format!(" {status}"),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(message), rows[0]);

    frame.render_widget(
        Paragraph::new(Line::from(controls_for(app))).alignment(Alignment::Center),
        rows[1],
    );
}

fn controls_for(app: &App) -> Vec<Span<'static>> {
    fn key(label: &str) -> Span<'static> {
        Span::styled(label.to_string(), Style::default().fg(Color::Yellow))
    }
    fn desc(label: &str) -> Span<'static> {
        Span::raw(format!(": {label}  "))
    }

    if app.dragging_id.is_some() {
        return vec![
            key("j/k"),
            desc("Pick target"),
            key("Enter/g"),
            desc("Drop here"),
            key("Esc"),
            desc("Cancel move"),
        ];
    }

    match app.focus {
        Focus::List => vec![
            key("j/k"),
            desc("Move"),
            key("Space"),
            desc("Done"),
            key("e"),
            desc("Edit"),
            key("d"),
            desc("Delete"),
            key("g"),
            desc("Grab"),
            key("n"),
            desc("New"),
            key("/"),
            desc("Search"),
            key("c"),
            desc("Calendar"),
            key("f"),
            desc("Filter"),
            key("r"),
            desc("Reload"),
            key("L"),
            desc("Logout"),
            key("q"),
            desc("Quit"),
        ],
        Focus::NewTitle | Focus::NewDue => vec![
            key("Tab"),
            desc("Switch field"),
            key("Enter"),
            desc("Add"),
            key("Esc"),
            desc("Back to list"),
        ],
        Focus::Search => vec![
            key("Enter/Esc"),
            desc("Back to list"),
            key("Ctrl+x"),
            desc("Clear search"),
        ],
        Focus::Calendar => vec![
            key("h/l"),
            desc("Day"),
            key("j/k"),
            desc("Week"),
            key("[/]"),
            desc("Month"),
            key("Enter"),
            desc("Filter day"),
            key("x"),
            desc("Clear"),
            key("Esc"),
            desc("Back"),
        ],
    }
}
