use std::time::{Duration, Instant};

use time::Date;

pub mod calendar;
pub mod filters;
mod state;
mod tasks;

use gorev_api::Todo;
pub use state::{
    validate_submission, EditField, EditState, Focus, SessionState, StatusFilter, Submission,
    TextInput,
};
pub use tasks::TaskList;

const STATUS_VISIBLE_FOR: Duration = Duration::from_millis(2500);

pub struct App {
    pub running: bool,

    // Session lifecycle
    pub session: SessionState,
    /// Bumped every time the session ends. Background results carry the
    /// epoch they were spawned under; a mismatch means the response is
    /// stale and must not be applied.
    pub session_epoch: u64,

    // Canonical state + the single error slot
    pub tasks: TaskList,
    pub error: Option<String>,
    pub status_message: Option<String>,
    status_expires: Option<Instant>,

    // View filter state (never sent to the server)
    pub filter: StatusFilter,
    pub search_input: TextInput,
    pub selected_due: Option<String>,
    /// First day of the displayed calendar month.
    pub cal_month: Date,
    /// Highlighted day while the calendar has focus.
    pub cal_cursor: Date,
    pub today: Date,

    // Input + navigation
    pub focus: Focus,
    pub selected_index: usize,
    pub new_title: TextInput,
    pub new_due: TextInput,
    pub editor: Option<EditState>,
    pub delete_pending: Option<i64>,
    pub dragging_id: Option<i64>,

    pub in_flight: bool,
    pub loading: bool,
}

impl App {
    pub fn new(today: Date) -> Self {
        Self {
            running: true,
            session: SessionState::Authenticated,
            session_epoch: 0,
            tasks: TaskList::default(),
            error: None,
            status_message: None,
            status_expires: None,
            filter: StatusFilter::All,
            search_input: TextInput::new(),
            selected_due: None,
            cal_month: calendar::first_of_month(today),
            cal_cursor: today,
            today,
            focus: Focus::List,
            selected_index: 0,
            new_title: TextInput::new(),
            new_due: TextInput::new(),
            editor: None,
            delete_pending: None,
            dragging_id: None,
            in_flight: false,
            loading: false,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.session == SessionState::Authenticated
    }

    pub fn today_iso(&self) -> String {
        calendar::format_iso_date(self.today)
    }

    // --- error banner and status toast ---

    /// One error at a time; a new error replaces the old.
    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
        self.status_expires = Some(Instant::now() + STATUS_VISIBLE_FOR);
    }

    /// Expire the transient status toast.
    pub fn tick_status(&mut self, now: Instant) {
        if matches!(self.status_expires, Some(at) if now >= at) {
            self.status_message = None;
            self.status_expires = None;
        }
    }

    // --- session lifecycle ---

    /// Leave the authenticated state: wipe the task collection so no
    /// stale data from this principal stays visible, drop every
    /// in-progress interaction, and invalidate outstanding background
    /// work via the epoch. `message` lands in the error slot (the
    /// session-expired text, or nothing for an explicit logout).
    pub fn end_session(&mut self, message: Option<String>) {
        self.tasks.clear();
        self.session = SessionState::Ended;
        self.session_epoch += 1;
        self.editor = None;
        self.delete_pending = None;
        self.dragging_id = None;
        self.in_flight = false;
        self.selected_index = 0;
        self.selected_due = None;
        self.focus = Focus::List;
        self.status_message = None;
        self.status_expires = None;
        self.error = message;
    }

    // --- derived views ---

    /// The tasks currently shown: status + query filter, then the
    /// calendar-day narrowing. A fresh snapshot each call.
    pub fn visible(&self) -> Vec<&Todo> {
        let filtered = filters::visible_tasks(&self.tasks, self.filter, &self.search_input.value());
        filters::narrow_by_day(filtered, self.selected_due.as_deref())
    }

    pub fn visible_ids(&self) -> Vec<i64> {
        self.visible().into_iter().map(|t| t.id).collect()
    }

    pub fn selected_task_id(&self) -> Option<i64> {
        self.visible_ids().get(self.selected_index).copied()
    }

    // --- list navigation ---

    pub fn move_selection(&mut self, delta: i64) {
        let len = self.visible().len();
        if len == 0 {
            self.selected_index = 0;
            return;
        }
        let current = self.selected_index as i64;
        self.selected_index = (current + delta).clamp(0, len as i64 - 1) as usize;
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    // --- calendar ---

    /// Toggle the day filter. Selecting the already-selected day clears
    /// it; a day with no due tasks never becomes selected.
    pub fn select_day(&mut self, day: String) {
        if self.selected_due.as_deref() == Some(day.as_str()) {
            self.selected_due = None;
            self.selected_index = 0;
            return;
        }
        let counts = filters::due_counts(&self.tasks);
        if counts.get(&day).copied().unwrap_or(0) > 0 {
            self.selected_due = Some(day);
            self.selected_index = 0;
        }
    }

    pub fn clear_day_filter(&mut self) {
        if self.selected_due.take().is_some() {
            self.selected_index = 0;
        }
    }

    pub fn month_prev(&mut self) {
        self.cal_month = calendar::prev_month(self.cal_month);
        self.cal_cursor = self.cal_month;
    }

    pub fn month_next(&mut self) {
        self.cal_month = calendar::next_month(self.cal_month);
        self.cal_cursor = self.cal_month;
    }

    /// Move the calendar cursor by whole days; the displayed month
    /// follows the cursor across boundaries.
    pub fn cursor_move(&mut self, days: i64) {
        self.cal_cursor += time::Duration::days(days);
        self.cal_month = calendar::first_of_month(self.cal_cursor);
    }

    // --- editor ---

    pub fn open_editor(&mut self, id: i64) {
        let Some(todo) = self.tasks.get(id) else {
            return;
        };
        self.editor = Some(EditState {
            id,
            title: TextInput::from_str(&todo.title),
            due: TextInput::from_str(todo.due_date.as_deref().unwrap_or("")),
            focused: EditField::Title,
        });
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    // --- delete confirmation ---

    pub fn begin_delete(&mut self, id: i64) {
        self.delete_pending = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.delete_pending = None;
    }

    // --- reorder ---

    pub fn start_drag(&mut self) {
        self.dragging_id = self.selected_task_id();
    }

    pub fn cancel_drag(&mut self) {
        self.dragging_id = None;
    }

    /// Drop the grabbed task onto `target`, applying the new order
    /// locally right away. Returns true when the order actually
    /// changed and therefore needs persisting.
    pub fn drop_dragged(&mut self, target: i64) -> bool {
        let Some(source) = self.dragging_id.take() else {
            return false;
        };
        self.tasks.move_by_id(source, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: i64, due: Option<&str>) -> Todo {
        Todo {
            id,
            title: format!("task {id}"),
            completed: false,
            due_date: due.map(str::to_string),
        }
    }

    fn app_with_tasks(todos: Vec<Todo>) -> App {
        let mut app = App::new(calendar::parse_iso_date("2024-03-15").unwrap());
        app.tasks.replace_all(todos);
        app
    }

    #[test]
    fn ending_the_session_wipes_everything_and_bumps_epoch() {
        let mut app = app_with_tasks(vec![todo(1, None), todo(2, None)]);
        app.selected_index = 1;
        app.dragging_id = Some(1);
        app.in_flight = true;
        let epoch = app.session_epoch;

        app.end_session(Some("Session expired. Please sign in again.".to_string()));

        assert!(!app.is_authenticated());
        assert!(app.tasks.is_empty());
        assert_eq!(app.session_epoch, epoch + 1);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.dragging_id, None);
        assert!(!app.in_flight);
        assert_eq!(
            app.error.as_deref(),
            Some("Session expired. Please sign in again.")
        );
    }

    #[test]
    fn day_selection_toggles_and_ignores_empty_days() {
        let mut app = app_with_tasks(vec![todo(1, Some("2024-03-10")), todo(2, None)]);

        app.select_day("2024-03-11".to_string());
        assert_eq!(app.selected_due, None);

        app.select_day("2024-03-10".to_string());
        assert_eq!(app.selected_due.as_deref(), Some("2024-03-10"));

        // re-selecting the same day clears the filter
        app.select_day("2024-03-10".to_string());
        assert_eq!(app.selected_due, None);
    }

    #[test]
    fn drop_applies_move_locally_and_reports_change() {
        let mut app = app_with_tasks(vec![todo(1, None), todo(2, None), todo(3, None)]);
        app.selected_index = 0;
        app.start_drag();
        assert_eq!(app.dragging_id, Some(1));

        assert!(app.drop_dragged(3));
        assert_eq!(app.tasks.ids(), vec![2, 3, 1]);
        assert_eq!(app.dragging_id, None);

        // dropping onto itself changes nothing
        app.start_drag();
        let grabbed = app.dragging_id.unwrap();
        assert!(!app.drop_dragged(grabbed));
    }

    #[test]
    fn visible_respects_filter_query_and_day() {
        let mut app = app_with_tasks(vec![
            todo(1, Some("2024-03-10")),
            todo(2, Some("2024-03-11")),
            todo(3, None),
        ]);
        app.search_input = TextInput::from_str("task");
        assert_eq!(app.visible_ids(), vec![1, 2, 3]);

        app.selected_due = Some("2024-03-11".to_string());
        assert_eq!(app.visible_ids(), vec![2]);
    }

    #[test]
    fn status_toast_expires() {
        let mut app = app_with_tasks(vec![]);
        app.set_status("Task added");
        assert!(app.status_message.is_some());
        app.tick_status(Instant::now() + Duration::from_secs(5));
        assert_eq!(app.status_message, None);
    }
}
