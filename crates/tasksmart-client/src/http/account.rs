/*
[INPUT]:  Credentials, registration details and password reset tokens
[OUTPUT]: Auth responses, transfer results and confirmation messages
[POS]:    HTTP layer - account endpoints (auth, guest transfer, password reset)
[UPDATE]: When adding new account endpoints or changing the auth flow
*/

use reqwest::Method;

use crate::http::{Result, TaskSmartClient};
use crate::types::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, MessageResponse, RegisterRequest,
    ResetPasswordRequest, TransferGuestTasksRequest, TransferResult, User,
};

impl TaskSmartClient {
    /// POST /api/auth/register
    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse> {
        let builder = self.request(Method::POST, "/api/auth/register")?.json(req);
        self.send_json(builder).await
    }

    /// POST /api/auth/login
    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse> {
        let builder = self.request(Method::POST, "/api/auth/login")?.json(req);
        self.send_json(builder).await
    }

    /// Create an anonymous guest user
    ///
    /// POST /api/auth/guest
    pub async fn create_guest(&self) -> Result<AuthResponse> {
        let builder = self.request(Method::POST, "/api/auth/guest")?;
        self.send_json(builder).await
    }

    /// GET /api/auth/me
    pub async fn current_user(&self) -> Result<User> {
        let builder = self.authed_request(Method::GET, "/api/auth/me")?;
        self.send_json(builder).await
    }

    /// Move every task owned by `guest_id` to the current session's user
    ///
    /// POST /api/auth/transfer-guest-tasks
    pub async fn transfer_guest_tasks(&self, guest_id: &str) -> Result<TransferResult> {
        let req = TransferGuestTasksRequest {
            guest_id: guest_id.to_string(),
        };
        let builder = self
            .authed_request(Method::POST, "/api/auth/transfer-guest-tasks")?
            .json(&req);
        self.send_json(builder).await
    }

    /// POST /api/auth/forgot-password
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse> {
        let req = ForgotPasswordRequest {
            email: email.trim().to_string(),
        };
        let builder = self
            .request(Method::POST, "/api/auth/forgot-password")?
            .json(&req);
        self.send_json(builder).await
    }

    /// POST /api/auth/reset-password
    pub async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<MessageResponse> {
        let builder = self
            .request(Method::POST, "/api/auth/reset-password")?
            .json(req);
        self.send_json(builder).await
    }
}
