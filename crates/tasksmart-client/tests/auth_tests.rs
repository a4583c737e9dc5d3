/*
[INPUT]:  Mock authentication responses
[OUTPUT]: Test results for auth flow
[POS]:    Integration tests - authentication and password recovery
[UPDATE]: When auth endpoints or flow changes
*/

mod common;

use common::{client_for, setup_mock_server};
use tasksmart_client::{AuthManager, TaskSmartError};
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_auth_manager_creation() {
    let server = setup_mock_server().await;
    let auth = AuthManager::new(client_for(&server));

    assert!(auth.session().is_expired());
    assert!(auth.session().user().is_none());
}

#[tokio::test]
async fn test_guest_session_then_logout() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/guest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "guest-token",
            "user": { "_id": "guest-42", "name": "Guest", "isGuest": true }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthManager::new(client_for(&server));
    let session = assert_ok!(auth.start_guest_session().await);

    assert_eq!(session.user.id, "guest-42");
    assert!(auth.session().is_guest());

    auth.logout();
    assert!(auth.session().token().is_none());
}

#[tokio::test]
async fn test_guest_endpoint_returning_registered_user_is_rejected() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/guest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "t",
            "user": { "id": "u-1", "name": "Ada", "isGuest": false }
        })))
        .mount(&server)
        .await;

    let auth = AuthManager::new(client_for(&server));
    let err = auth.start_guest_session().await.unwrap_err();
    assert!(matches!(err, TaskSmartError::InvalidResponse(_)));
    assert!(auth.session().session().is_none());
}

#[tokio::test]
async fn test_register_conflict_surfaces_body_message() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "message": "An account with that email already exists"
        })))
        .mount(&server)
        .await;

    let auth = AuthManager::new(client_for(&server));
    let err = auth
        .register("Ada", "ada@example.com", "hunter22")
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "An account with that email already exists");
}

#[tokio::test]
async fn test_password_reset_round() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/forgot-password"))
        .and(body_json(serde_json::json!({ "email": "ada@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Reset link sent"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/reset-password"))
        .and(body_json(serde_json::json!({ "token": "abc123", "password": "new-secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Password updated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthManager::new(client_for(&server));
    let sent = assert_ok!(auth.request_password_reset(" ada@example.com ").await);
    assert_eq!(sent, "Reset link sent");

    let done = assert_ok!(auth.reset_password(" abc123 ", "new-secret").await);
    assert_eq!(done, "Password updated");
}

#[tokio::test]
async fn test_refresh_user_updates_cached_record() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "user-1",
            "name": "Ada Lovelace",
            "email": "ada@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthManager::new(common::logged_in_client(&server));
    let session = assert_ok!(auth.refresh_user().await);

    assert_eq!(session.user.name, "Ada Lovelace");
    assert_eq!(
        auth.session().user().map(|user| user.name),
        Some("Ada Lovelace".to_string())
    );
}
