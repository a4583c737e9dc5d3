/*
[INPUT]:  HTTP client and user credentials
[OUTPUT]: Authenticated or guest session stored in the shared SessionManager
[POS]:    Auth layer - orchestrates login, registration and password recovery
[UPDATE]: When auth endpoints or flow steps change
*/

use tracing::{debug, info};

use crate::http::{Result, TaskSmartClient, TaskSmartError};
use crate::types::{AuthResponse, LoginRequest, RegisterRequest, ResetPasswordRequest, TransferResult};

use super::{SessionData, SessionManager};

const MIN_PASSWORD_LEN: usize = 6;

/// Manages the complete authentication flow
#[derive(Debug, Clone)]
pub struct AuthManager {
    client: TaskSmartClient,
}

impl AuthManager {
    pub fn new(client: TaskSmartClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &TaskSmartClient {
        &self.client
    }

    pub fn session(&self) -> &SessionManager {
        self.client.session()
    }

    /// Start an anonymous session backed by a server-side guest user
    pub async fn start_guest_session(&self) -> Result<SessionData> {
        let response = self.client.create_guest().await?;
        if !response.user.is_guest {
            return Err(TaskSmartError::InvalidResponse(
                "guest endpoint returned a registered user".to_string(),
            ));
        }
        info!(guest_id = %response.user.id, "guest session started");
        Ok(self.store(response))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<SessionData> {
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(TaskSmartError::Validation("password is required".to_string()));
        }

        let response = self
            .client
            .login(&LoginRequest {
                email,
                password: password.to_string(),
            })
            .await?;
        info!(user_id = %response.user.id, "logged in");
        Ok(self.store(response))
    }

    /// Create an account and switch the session to it.
    ///
    /// The previous session (guest or not) is replaced only on success.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<SessionData> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TaskSmartError::Validation("name is required".to_string()));
        }
        let email = normalize_email(email)?;
        validate_password(password)?;

        let response = self
            .client
            .register(&RegisterRequest {
                name: name.to_string(),
                email,
                password: password.to_string(),
            })
            .await?;
        info!(user_id = %response.user.id, "account registered");
        Ok(self.store(response))
    }

    /// Reassign a guest's tasks to the currently logged-in account
    pub async fn transfer_guest_tasks(&self, guest_id: &str) -> Result<TransferResult> {
        if self.session().is_guest() {
            return Err(TaskSmartError::Validation(
                "guest tasks can only be transferred into a registered account".to_string(),
            ));
        }
        let result = self.client.transfer_guest_tasks(guest_id).await?;
        info!(guest_id, transferred = result.transferred, "guest tasks transferred");
        Ok(result)
    }

    /// Refresh the cached user record from the server
    pub async fn refresh_user(&self) -> Result<SessionData> {
        let user = self.client.current_user().await?;
        let mut session = self.session().session().ok_or(TaskSmartError::SessionExpired)?;
        session.user = user;
        self.session().restore(session.clone());
        Ok(session)
    }

    /// Ask the server to email a reset link
    pub async fn request_password_reset(&self, email: &str) -> Result<String> {
        let email = normalize_email(email)?;
        let response = self.client.forgot_password(&email).await?;
        Ok(response.message)
    }

    pub async fn reset_password(&self, token: &str, password: &str) -> Result<String> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TaskSmartError::Validation("reset token is required".to_string()));
        }
        validate_password(password)?;
        let response = self
            .client
            .reset_password(&ResetPasswordRequest {
                token: token.to_string(),
                password: password.to_string(),
            })
            .await?;
        Ok(response.message)
    }

    pub fn logout(&self) {
        debug!("session cleared");
        self.session().clear();
    }

    fn store(&self, response: AuthResponse) -> SessionData {
        self.session().set_session(response.token, response.user)
    }
}

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if valid {
        Ok(email.to_ascii_lowercase())
    } else {
        Err(TaskSmartError::Validation(
            "please enter a valid email address".to_string(),
        ))
    }
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(TaskSmartError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::ClientConfig;

    async fn auth_for(server: &MockServer) -> AuthManager {
        let client =
            TaskSmartClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
                .unwrap();
        AuthManager::new(client)
    }

    #[rstest]
    #[case("ada@example.com", true)]
    #[case("  Ada@Example.COM ", true)]
    #[case("ada@localhost", false)]
    #[case("@example.com", false)]
    #[case("ada.example.com", false)]
    fn test_normalize_email(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(normalize_email(input).is_ok(), ok);
    }

    #[tokio::test]
    async fn test_register_rejects_short_password_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let auth = auth_for(&server).await;
        let err = auth.register("Ada", "ada@example.com", "123").await.unwrap_err();
        assert!(matches!(err, TaskSmartError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_replaces_guest_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/guest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "guest-token",
                "user": { "id": "g-1", "name": "Guest", "isGuest": true }
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .and(body_json(serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "hunter22"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "token": "user-token",
                "user": { "id": "u-1", "name": "Ada", "email": "ada@example.com" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let auth = auth_for(&server).await;
        let guest = auth.start_guest_session().await.unwrap();
        assert!(guest.is_guest());

        let session = auth
            .register("Ada", "Ada@Example.com", "hunter22")
            .await
            .unwrap();
        assert_eq!(session.user.id, "u-1");
        assert!(!auth.session().is_guest());
        assert_eq!(auth.session().token(), Some("user-token".to_string()));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "Invalid credentials"
            })))
            .mount(&server)
            .await;

        let auth = auth_for(&server).await;
        auth.session().set_session(
            "guest-token".to_string(),
            crate::types::User {
                id: "g-1".to_string(),
                name: "Guest".to_string(),
                email: None,
                is_guest: true,
            },
        );

        let err = auth.login("ada@example.com", "wrong-pass").await.unwrap_err();
        assert!(err.is_auth_error());
        assert_eq!(err.user_message(), "Invalid credentials");
        assert_eq!(auth.session().token(), Some("guest-token".to_string()));
    }

    #[tokio::test]
    async fn test_transfer_uses_registered_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/transfer-guest-tasks"))
            .and(header("authorization", "Bearer user-token"))
            .and(body_json(serde_json::json!({ "guestId": "g-1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "transferred": 3
            })))
            .expect(1)
            .mount(&server)
            .await;

        let auth = auth_for(&server).await;
        auth.session().set_session(
            "user-token".to_string(),
            crate::types::User {
                id: "u-1".to_string(),
                name: "Ada".to_string(),
                email: None,
                is_guest: false,
            },
        );

        let result = auth.transfer_guest_tasks("g-1").await.unwrap();
        assert_eq!(result.transferred, 3);
    }
}
