/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for tasksmart-client tests

use tasksmart_client::{ClientConfig, TaskSmartClient, User};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server, with no session
pub fn client_for(server: &MockServer) -> TaskSmartClient {
    TaskSmartClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init")
}

/// Client pointed at the mock server, logged in as a registered user
#[allow(dead_code)]
pub fn logged_in_client(server: &MockServer) -> TaskSmartClient {
    let client = client_for(server);
    client.session().set_session(mock_token(), test_user(false));
    client
}

pub fn test_user(is_guest: bool) -> User {
    User {
        id: if is_guest { "guest-1" } else { "user-1" }.to_string(),
        name: if is_guest { "Guest" } else { "Ada" }.to_string(),
        email: (!is_guest).then(|| "ada@example.com".to_string()),
        is_guest,
    }
}

/// Opaque bearer token for testing
pub fn mock_token() -> String {
    "test-bearer-token".to_string()
}
