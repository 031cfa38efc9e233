use serde::{Deserialize, Serialize};

/// A single task as returned by the server.
///
/// `due_date` stays in its wire form (`YYYY-MM-DD`); ISO dates compare
/// lexicographically in calendar order, so the client never needs to
/// parse it except for calendar math.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Body for create and rename/reschedule requests.
///
/// `due_date` is always serialized, as an explicit `null` when absent,
/// so a rename can clear a previously set date.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPayload<'a> {
    pub title: &'a str,
    pub due_date: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_deserializes_wire_shape() {
        let json = r#"{"id":7,"title":"Buy milk","completed":false,"dueDate":"2024-03-10"}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.id, 7);
        assert_eq!(todo.title, "Buy milk");
        assert!(!todo.completed);
        assert_eq!(todo.due_date.as_deref(), Some("2024-03-10"));
    }

    #[test]
    fn todo_due_date_null_is_absent() {
        let json = r#"{"id":1,"title":"x","completed":true,"dueDate":null}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.due_date, None);
    }

    #[test]
    fn payload_serializes_null_due_date() {
        let body = serde_json::to_string(&TodoPayload {
            title: "Call mom",
            due_date: None,
        })
        .unwrap();
        assert_eq!(body, r#"{"title":"Call mom","dueDate":null}"#);
    }
}
