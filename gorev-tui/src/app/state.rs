use crate::app::calendar::parse_iso_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// A token is present; the task list mirrors the server.
    Authenticated,
    /// Explicit logout or a server-signaled authorization failure.
    /// No authenticated requests are issued in this state.
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn admits(self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !completed,
            StatusFilter::Completed => completed,
        }
    }

    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active",
            StatusFilter::Completed => "Completed",
        }
    }
}

/// Which part of the screen receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    NewTitle,
    NewDue,
    Search,
    Calendar,
}

/// A text input with mid-string cursor support. Stored as chars so
/// cursor movement never lands inside a UTF-8 sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    chars: Vec<char>,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        let chars: Vec<char> = s.chars().collect();
        let cursor = chars.len();
        Self { chars, cursor }
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn insert(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.chars.len() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.chars.len();
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    /// The value split at the cursor, for rendering a visible caret.
    pub fn split_at_cursor(&self) -> (String, String) {
        (
            self.chars[..self.cursor].iter().collect(),
            self.chars[self.cursor..].iter().collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Due,
}

/// An in-progress rename/reschedule of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: i64,
    pub title: TextInput,
    pub due: TextInput,
    pub focused: EditField,
}

impl EditState {
    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused {
            EditField::Title => &mut self.title,
            EditField::Due => &mut self.due,
        }
    }

    pub fn toggle_field(&mut self) {
        self.focused = match self.focused {
            EditField::Title => EditField::Due,
            EditField::Due => EditField::Title,
        };
    }
}

/// Outcome of validating a title + due-date pair before any request is
/// built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Title trims to empty: silently discarded, never an error.
    Skip,
    /// Due text present but not a real `YYYY-MM-DD` date.
    InvalidDue,
    Ready {
        title: String,
        due_date: Option<String>,
    },
}

pub fn validate_submission(title: &str, due_text: &str) -> Submission {
    let title = title.trim();
    if title.is_empty() {
        return Submission::Skip;
    }

    let due = due_text.trim();
    if due.is_empty() {
        return Submission::Ready {
            title: title.to_string(),
            due_date: None,
        };
    }

    if parse_iso_date(due).is_none() {
        return Submission::InvalidDue;
    }

    Submission::Ready {
        title: title.to_string(),
        due_date: Some(due.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_is_skipped() {
        assert_eq!(validate_submission("   ", ""), Submission::Skip);
        assert_eq!(validate_submission("", "2024-03-10"), Submission::Skip);
    }

    #[test]
    fn title_and_due_are_trimmed() {
        assert_eq!(
            validate_submission("  Buy milk  ", " 2024-03-10 "),
            Submission::Ready {
                title: "Buy milk".to_string(),
                due_date: Some("2024-03-10".to_string()),
            }
        );
    }

    #[test]
    fn empty_due_means_no_deadline() {
        assert_eq!(
            validate_submission("Buy milk", "  "),
            Submission::Ready {
                title: "Buy milk".to_string(),
                due_date: None,
            }
        );
    }

    #[test]
    fn malformed_due_is_rejected_locally() {
        assert_eq!(validate_submission("x", "tomorrow"), Submission::InvalidDue);
        assert_eq!(validate_submission("x", "2024-13-01"), Submission::InvalidDue);
    }

    #[test]
    fn text_input_cursor_edits() {
        let mut input = TextInput::from_str("ab");
        input.move_left();
        input.insert('ç');
        assert_eq!(input.value(), "açb");
        input.backspace();
        assert_eq!(input.value(), "ab");
        assert_eq!(input.split_at_cursor(), ("a".to_string(), "b".to_string()));
    }
}
