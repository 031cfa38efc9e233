use gorev_api::{ApiError, TodoClient};

use crate::app::App;
use crate::session_store;

use super::action_queue::{Action, BackgroundResult, ResultTx};

const SESSION_EXPIRED: &str =
    "Session expired. Please sign in again with `gorev-tui login`.";

/// Initial full load when entering the authenticated state. The list
/// replaces the collection wholesale; it never merges.
pub async fn initialize_app_state(app: &mut App, client: &TodoClient) -> Result<(), ApiError> {
    app.loading = true;
    let result = client.list_todos().await;
    app.loading = false;

    app.tasks.replace_all(result?);
    Ok(())
}

pub(super) async fn run_action(
    action: Action,
    app: &mut App,
    client: &mut TodoClient,
    result_tx: &ResultTx,
) {
    // The session may have ended while this action sat in the queue.
    if !app.is_authenticated() {
        return;
    }

    match action {
        Action::CreateTask { title, due_date } => {
            handle_create(app, client, &title, due_date.as_deref()).await;
        }
        Action::ToggleTask { id } => {
            handle_toggle(app, client, id).await;
        }
        Action::SaveEdit {
            id,
            title,
            due_date,
        } => {
            handle_save_edit(app, client, id, &title, due_date.as_deref()).await;
        }
        Action::ConfirmDelete { id } => {
            handle_confirm_delete(app, client, id).await;
        }
        Action::PersistOrder => {
            spawn_persist_order(app, client, result_tx);
        }
        Action::ReloadTasks => {
            handle_reload(app, client).await;
        }
        Action::Logout => {
            handle_logout(app, client);
        }
    }

    app.in_flight = false;
}

/// No optimistic insertion: a created task has no id until the server
/// assigns one. Inputs clear only on success.
async fn handle_create(app: &mut App, client: &mut TodoClient, title: &str, due_date: Option<&str>) {
    match client.create_todo(title, due_date).await {
        Ok(created) => {
            app.tasks.prepend(created);
            app.new_title.clear();
            app.new_due.clear();
            app.clear_error();
            app.set_status("Task added");
            app.clamp_selection();
        }
        Err(e) => report_failure(app, client, e),
    }
}

/// The server's returned task replaces the entry wholesale, so the
/// local completed flag can never drift from the server's.
async fn handle_toggle(app: &mut App, client: &mut TodoClient, id: i64) {
    match client.toggle_todo(id).await {
        Ok(updated) => {
            app.tasks.reconcile(updated);
            app.clear_error();
            app.set_status("Status updated");
            app.clamp_selection();
        }
        Err(e) => report_failure(app, client, e),
    }
}

async fn handle_save_edit(
    app: &mut App,
    client: &mut TodoClient,
    id: i64,
    title: &str,
    due_date: Option<&str>,
) {
    match client.rename_todo(id, title, due_date).await {
        Ok(updated) => {
            app.tasks.reconcile(updated);
            app.close_editor();
            app.clear_error();
            app.set_status("Task updated");
        }
        // The editor stays open on failure so the user can retry.
        Err(e) => report_failure(app, client, e),
    }
}

async fn handle_confirm_delete(app: &mut App, client: &mut TodoClient, id: i64) {
    app.cancel_delete();
    match client.delete_todo(id).await {
        Ok(()) => {
            app.tasks.remove(id);
            app.clear_error();
            app.set_status("Task deleted");
            app.clamp_selection();
        }
        Err(e) => report_failure(app, client, e),
    }
}

/// Reorder persistence runs off the event loop; the drop already
/// applied the order locally and the UI must not wait. The epoch lets
/// the receiver drop results that arrive after the session ended.
fn spawn_persist_order(app: &App, client: &TodoClient, result_tx: &ResultTx) {
    let ids = app.tasks.ids();
    let epoch = app.session_epoch;
    let client = client.clone();
    let tx = result_tx.clone();

    tokio::spawn(async move {
        let result = client.reorder(&ids).await;
        let _ = tx.send(BackgroundResult::OrderPersisted { epoch, result });
    });
}

async fn handle_reload(app: &mut App, client: &mut TodoClient) {
    app.loading = true;
    let result = client.list_todos().await;
    app.loading = false;

    match result {
        Ok(todos) => {
            app.tasks.replace_all(todos);
            app.clear_error();
            app.clamp_selection();
        }
        Err(e) => report_failure(app, client, e),
    }
}

fn handle_logout(app: &mut App, client: &mut TodoClient) {
    client.clear_token();
    let _ = session_store::clear_token();
    app.end_session(Some("Logged out.".to_string()));
}

pub(super) fn handle_background_result(
    result: BackgroundResult,
    app: &mut App,
    client: &mut TodoClient,
) {
    match result {
        BackgroundResult::OrderPersisted { epoch, result } => {
            // A result from a previous session must never be applied.
            if epoch != app.session_epoch {
                return;
            }
            match result {
                Ok(()) => {}
                Err(ApiError::Unauthorized) => expire_session(app, client),
                // Local order is intentionally kept; the UI reflects the
                // user's intent and a reload resynchronizes.
                Err(e) => app.set_error(format!(
                    "Could not save order: {e}. Local order kept; press r to reload."
                )),
            }
        }
    }
}

/// Uniform unauthorized handling: clear the stored token, drop the
/// client's credential, and wipe app state. One message, no retry.
pub(super) fn expire_session(app: &mut App, client: &mut TodoClient) {
    client.clear_token();
    let _ = session_store::clear_token();
    app.end_session(Some(SESSION_EXPIRED.to_string()));
}

fn report_failure(app: &mut App, client: &mut TodoClient, error: ApiError) {
    match error {
        ApiError::Unauthorized => expire_session(app, client),
        other => app.set_error(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::calendar;
    use crate::runtime::action_queue::result_channel;
    use gorev_api::Todo;

    fn todo(id: i64) -> Todo {
        Todo {
            id,
            title: format!("task {id}"),
            completed: false,
            due_date: None,
        }
    }

    fn app_with_tasks(ids: &[i64]) -> App {
        let mut app = App::new(calendar::parse_iso_date("2024-03-15").unwrap());
        app.tasks.replace_all(ids.iter().copied().map(todo).collect());
        app
    }

    // Nothing listens on port 0; any request issued against this
    // client fails immediately with a network error.
    fn dead_client() -> TodoClient {
        TodoClient::new("http://localhost:0").unwrap()
    }

    #[test]
    fn reorder_result_from_an_older_epoch_is_dropped() {
        let mut app = app_with_tasks(&[1, 2]);
        let mut client = dead_client();
        app.session_epoch = 3;

        handle_background_result(
            BackgroundResult::OrderPersisted {
                epoch: 2,
                result: Err(ApiError::Unauthorized),
            },
            &mut app,
            &mut client,
        );

        // Applied in-date, that Unauthorized would have ended the
        // session and wiped the list.
        assert!(app.is_authenticated());
        assert_eq!(app.tasks.ids(), vec![1, 2]);
        assert_eq!(app.error, None);
    }

    #[test]
    fn failed_reorder_keeps_local_order_and_reports() {
        let mut app = app_with_tasks(&[2, 1]);
        let mut client = dead_client();

        handle_background_result(
            BackgroundResult::OrderPersisted {
                epoch: app.session_epoch,
                result: Err(ApiError::Remote {
                    status: 500,
                    message: "boom".to_string(),
                }),
            },
            &mut app,
            &mut client,
        );

        assert!(app.is_authenticated());
        assert_eq!(app.tasks.ids(), vec![2, 1]);
        let error = app.error.as_deref().unwrap();
        assert!(error.contains("Could not save order"));
        assert!(error.contains("Local order kept"));
    }

    #[test]
    fn unauthorized_reorder_result_ends_the_session() {
        let mut app = app_with_tasks(&[1, 2]);
        let mut client = dead_client();

        handle_background_result(
            BackgroundResult::OrderPersisted {
                epoch: app.session_epoch,
                result: Err(ApiError::Unauthorized),
            },
            &mut app,
            &mut client,
        );

        assert!(!app.is_authenticated());
        assert!(app.tasks.is_empty());
        assert_eq!(app.error.as_deref(), Some(SESSION_EXPIRED));
    }

    #[tokio::test]
    async fn action_queued_before_session_end_is_a_no_op() {
        let mut app = app_with_tasks(&[1]);
        let mut client = dead_client();
        let (result_tx, _result_rx) = result_channel();
        app.end_session(None);

        run_action(
            Action::ConfirmDelete { id: 1 },
            &mut app,
            &mut client,
            &result_tx,
        )
        .await;

        // Had the delete been attempted, the dead client's network
        // failure would have landed in the error slot.
        assert_eq!(app.error, None);
        assert!(!app.is_authenticated());
    }
}
