/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::models::{Task, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferResult {
    #[serde(default, alias = "count", alias = "transferredCount")]
    pub transferred: usize,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// The task list endpoint answers either with a bare array or wrapped in `tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskListResponse {
    Bare(Vec<Task>),
    Wrapped { tasks: Vec<Task> },
}

impl TaskListResponse {
    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            TaskListResponse::Bare(tasks) => tasks,
            TaskListResponse::Wrapped { tasks } => tasks,
        }
    }
}

/// Error payload shape returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> Option<String> {
        fn non_empty(field: Option<String>) -> Option<String> {
            field
                .map(|message| message.trim().to_string())
                .filter(|message| !message.is_empty())
        }
        non_empty(self.message).or_else(|| non_empty(self.error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_list_accepts_both_shapes() {
        let bare: TaskListResponse =
            serde_json::from_value(json!([{ "id": "a", "title": "one" }])).unwrap();
        let wrapped: TaskListResponse =
            serde_json::from_value(json!({ "tasks": [{ "id": "b", "title": "two" }] })).unwrap();

        assert_eq!(bare.into_tasks()[0].id, "a");
        assert_eq!(wrapped.into_tasks()[0].id, "b");
    }

    #[test]
    fn error_body_prefers_message_over_error() {
        let body: ApiErrorBody =
            serde_json::from_value(json!({ "message": "Email taken", "error": "Conflict" }))
                .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Email taken"));

        let body: ApiErrorBody = serde_json::from_value(json!({ "error": "  " })).unwrap();
        assert_eq!(body.into_message(), None);
    }

    #[test]
    fn error_body_skips_blank_message() {
        let body: ApiErrorBody = serde_json::from_value(
            json!({ "message": "", "error": "Email already registered" }),
        )
        .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Email already registered"));
    }

    #[test]
    fn transfer_result_accepts_count_alias() {
        let result: TransferResult = serde_json::from_value(json!({ "count": 4 })).unwrap();
        assert_eq!(result.transferred, 4);
        assert!(result.message.is_none());
    }
}
