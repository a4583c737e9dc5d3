/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for task endpoints
[POS]:    Integration tests - task HTTP endpoints
[UPDATE]: When task endpoints change
*/

mod common;

use chrono::NaiveDate;
use common::{client_for, logged_in_client, mock_token, setup_mock_server};
use tasksmart_client::{
    Category, ClientConfig, CreateTaskRequest, Priority, TaskSmartClient, TaskSmartError,
};
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let client = assert_ok!(TaskSmartClient::new());
    assert!(client.session().session().is_none());
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig::default();
    let _client = assert_ok!(TaskSmartClient::with_config(config));
}

#[tokio::test]
async fn test_list_tasks_requires_session() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.list_tasks().await.unwrap_err();
    assert!(matches!(err, TaskSmartError::SessionExpired));
}

#[tokio::test]
async fn test_list_tasks() {
    let server = setup_mock_server().await;
    let bearer = format!("Bearer {}", mock_token());
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "_id": "1", "title": "Pay rent", "category": "Personal", "priority": "High" },
            { "_id": "2", "title": "Standup notes", "category": "Work", "priority": "Low", "completed": true },
            { "_id": "3", "title": "Buy milk", "category": "Groceries" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let tasks = assert_ok!(client.list_tasks().await);

    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].priority, Priority::High);
    assert!(tasks[1].completed);
    assert_eq!(tasks[2].category, Category::Other("Groceries".to_string()));
}

#[tokio::test]
async fn test_create_task() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(body_json(serde_json::json!({
            "title": "Quarterly review",
            "category": "Work",
            "priority": "High",
            "dueDate": "2024-07-01"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "t-10",
            "title": "Quarterly review",
            "category": "Work",
            "priority": "High",
            "completed": false,
            "dueDate": "2024-07-01T00:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let req = CreateTaskRequest {
        title: "Quarterly review".to_string(),
        category: Category::Work,
        priority: Priority::High,
        due_date: NaiveDate::from_ymd_opt(2024, 7, 1),
        notes: None,
    };
    let task = assert_ok!(client.create_task(&req).await);

    assert_eq!(task.id, "t-10");
    assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 7, 1));
}

#[tokio::test]
async fn test_complete_task() {
    let server = setup_mock_server().await;
    Mock::given(method("PATCH"))
        .and(path("/api/tasks/t-4/complete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "t-4",
            "title": "Call plumber",
            "completed": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let task = assert_ok!(client.complete_task("t-4").await);
    assert!(task.completed);
}

#[tokio::test]
async fn test_process_free_text_task() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/process"))
        .and(body_json(serde_json::json!({ "text": "submit report friday, urgent" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "t-11",
            "title": "Submit report",
            "category": "Work",
            "priority": "High"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let task = assert_ok!(client.process_task("  submit report friday, urgent ").await);
    assert_eq!(task.title, "Submit report");
    assert_eq!(task.category, Category::Work);
}

#[tokio::test]
async fn test_server_error_falls_back_to_generic_message() {
    let server = setup_mock_server().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/t-5"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let err = client.delete_task("t-5").await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(err.user_message(), tasksmart_client::GENERIC_ERROR_MESSAGE);
}
