use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
    /// The server answered 401 or 403. The session is over; callers must
    /// clear local state and must not retry with the same token.
    #[error("Session expired. Please sign in again.")]
    Unauthorized,
    /// Any other non-success status, with the message extracted from the
    /// structured error body.
    #[error("{message}")]
    Remote { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to parse server response: {0}")]
    Parse(String),
}

/// A per-field validation message: either a single string or a list of
/// strings, depending on how many constraints the field violated.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldMessage {
    One(String),
    Many(Vec<String>),
}

impl FieldMessage {
    fn into_first(self) -> Option<String> {
        match self {
            FieldMessage::One(message) => Some(message),
            FieldMessage::Many(messages) => messages.into_iter().next(),
        }
    }
}

/// The error body shape shared by the task and auth services:
/// an optional `errors` map keyed by field name, plus an optional
/// top-level `message`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    message: Option<String>,
}

/// Extract a user-facing message from a failed response body.
///
/// Preference order: the first entry of the per-field `errors` map,
/// then the top-level `message`, then a generic status line when the
/// body is missing or unparseable.
pub(crate) fn extract_message(body: &[u8], status: u16) -> String {
    let generic = || format!("API error: {status}");

    let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) else {
        return generic();
    };

    if let Some(errors) = parsed.errors {
        let first = errors
            .into_iter()
            .next()
            .and_then(|(_, value)| serde_json::from_value::<FieldMessage>(value).ok())
            .and_then(FieldMessage::into_first);
        if let Some(message) = first {
            return message;
        }
    }

    parsed.message.unwrap_or_else(generic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_first_field_error_string() {
        let body = br#"{"message":"Validation failed","errors":{"title":"Title must not be blank","dueDate":"bad"}}"#;
        assert_eq!(extract_message(body, 400), "Title must not be blank");
    }

    #[test]
    fn takes_first_element_of_field_error_list() {
        let body = br#"{"errors":{"title":["Too long","Too boring"]}}"#;
        assert_eq!(extract_message(body, 400), "Too long");
    }

    #[test]
    fn falls_back_to_top_level_message() {
        let body = br#"{"message":"Todo not found: 42"}"#;
        assert_eq!(extract_message(body, 404), "Todo not found: 42");
    }

    #[test]
    fn empty_field_list_falls_back_to_message() {
        let body = br#"{"message":"Validation failed","errors":{"title":[]}}"#;
        assert_eq!(extract_message(body, 400), "Validation failed");
    }

    #[test]
    fn unparseable_body_yields_generic_message() {
        assert_eq!(extract_message(b"<html>oops</html>", 502), "API error: 502");
        assert_eq!(extract_message(b"", 500), "API error: 500");
    }
}
