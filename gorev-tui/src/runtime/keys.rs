use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{
    calendar, validate_submission, App, Focus, SessionState, Submission, TextInput,
};

use super::action_queue::{Action, ActionTx};

pub(super) fn handle_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.session == SessionState::Ended {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            app.quit();
        }
        return;
    }

    if app.delete_pending.is_some() {
        handle_delete_dialog_key(key, app, action_tx);
        return;
    }
    if app.editor.is_some() {
        handle_editor_key(key, app, action_tx);
        return;
    }

    match app.focus {
        Focus::List => handle_list_key(key, app, action_tx),
        Focus::NewTitle | Focus::NewDue => handle_new_task_key(key, app, action_tx),
        Focus::Search => handle_search_key(key, app),
        Focus::Calendar => handle_calendar_key(key, app),
    }
}

/// Enqueue a mutation unless one is already outstanding; duplicate
/// submissions of the same logical action are dropped here.
fn submit_mutation(app: &mut App, action_tx: &ActionTx, action: Action) {
    if app.in_flight {
        return;
    }
    app.in_flight = true;
    let _ = action_tx.send(action);
}

fn handle_list_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        // An active grab turns Enter/g into the drop.
        KeyCode::Enter | KeyCode::Char('g') if app.dragging_id.is_some() => {
            match app.selected_task_id() {
                Some(target) => {
                    if app.drop_dragged(target) {
                        let _ = action_tx.send(Action::PersistOrder);
                    }
                }
                None => app.cancel_drag(),
            }
        }
        KeyCode::Char('g') => app.start_drag(),
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(id) = app.selected_task_id() {
                submit_mutation(app, action_tx, Action::ToggleTask { id });
            }
        }
        KeyCode::Char('e') => {
            if let Some(id) = app.selected_task_id() {
                app.open_editor(id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_task_id() {
                app.begin_delete(id);
            }
        }
        KeyCode::Char('r') => {
            let _ = action_tx.send(Action::ReloadTasks);
        }
        KeyCode::Char('f') => {
            app.filter = app.filter.next();
            app.selected_index = 0;
        }
        KeyCode::Char('x') => {
            app.search_input.clear();
            app.clear_day_filter();
            app.selected_index = 0;
        }
        KeyCode::Char('n') => app.focus = Focus::NewTitle,
        KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Char('c') => app.focus = Focus::Calendar,
        KeyCode::Char('[') => app.month_prev(),
        KeyCode::Char(']') => app.month_next(),
        KeyCode::Char('L') => {
            let _ = action_tx.send(Action::Logout);
        }
        KeyCode::Esc => app.cancel_drag(),
        _ => {}
    }
}

fn handle_new_task_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = match app.focus {
                Focus::NewTitle => Focus::NewDue,
                _ => Focus::NewTitle,
            };
        }
        KeyCode::Esc => app.focus = Focus::List,
        KeyCode::Enter => {
            match validate_submission(&app.new_title.value(), &app.new_due.value()) {
                // Empty title: nothing is sent and the inputs stay put.
                Submission::Skip => {}
                Submission::InvalidDue => {
                    app.set_error("Due date must be YYYY-MM-DD".to_string());
                }
                Submission::Ready { title, due_date } => {
                    submit_mutation(app, action_tx, Action::CreateTask { title, due_date });
                }
            }
        }
        _ => edit_input(key, new_task_input(app)),
    }
}

fn new_task_input(app: &mut App) -> &mut TextInput {
    match app.focus {
        Focus::NewDue => &mut app.new_due,
        _ => &mut app.new_title,
    }
}

fn handle_search_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.focus = Focus::List,
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input.clear();
            app.selected_index = 0;
        }
        _ => {
            edit_input(key, &mut app.search_input);
            // The query changed; the old selection no longer lines up.
            app.selected_index = 0;
        }
    }
}

fn handle_calendar_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.cursor_move(-1),
        KeyCode::Right | KeyCode::Char('l') => app.cursor_move(1),
        KeyCode::Up | KeyCode::Char('k') => app.cursor_move(-7),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_move(7),
        KeyCode::Char('[') => app.month_prev(),
        KeyCode::Char(']') => app.month_next(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.select_day(calendar::format_iso_date(app.cal_cursor));
        }
        KeyCode::Char('x') => app.clear_day_filter(),
        KeyCode::Esc | KeyCode::Char('c') => app.focus = Focus::List,
        _ => {}
    }
}

fn handle_editor_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(editor) = app.editor.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => editor.toggle_field(),
        KeyCode::Esc => app.close_editor(),
        KeyCode::Enter => {
            let id = editor.id;
            match validate_submission(&editor.title.value(), &editor.due.value()) {
                // Empty title: the edit is silently discarded.
                Submission::Skip => app.close_editor(),
                Submission::InvalidDue => {
                    app.set_error("Due date must be YYYY-MM-DD".to_string());
                }
                Submission::Ready { title, due_date } => {
                    submit_mutation(
                        app,
                        action_tx,
                        Action::SaveEdit {
                            id,
                            title,
                            due_date,
                        },
                    );
                }
            }
        }
        _ => edit_input(key, editor.focused_input()),
    }
}

fn handle_delete_dialog_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            if let Some(id) = app.delete_pending {
                submit_mutation(app, action_tx, Action::ConfirmDelete { id });
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
}

fn edit_input(key: KeyEvent, input: &mut TextInput) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => {}
    }
}
