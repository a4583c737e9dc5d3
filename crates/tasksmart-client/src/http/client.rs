/*
[INPUT]:  HTTP configuration (base URL, timeouts) and the shared session
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::auth::SessionManager;
use crate::http::{Result, TaskSmartError};
use crate::types::ApiErrorBody;

/// Default TaskSmart API location
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main HTTP client for the TaskSmart API
#[derive(Debug, Clone)]
pub struct TaskSmartClient {
    http_client: Client,
    base_url: Url,
    session: SessionManager,
}

impl TaskSmartClient {
    /// Create a new client against the default base URL
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a new client with custom configuration and base URL
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(TaskSmartError::Config(format!(
                "base URL cannot be used as a base: {base_url}"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
            session: SessionManager::new(),
        })
    }

    /// Session shared by every request made through this client
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint)?)
    }

    /// Build request builder without credentials
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        Ok(self
            .http_client
            .request(method, url)
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string()))
    }

    /// Build request builder carrying the session bearer token
    pub(crate) fn authed_request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let session = self.session.session().ok_or(TaskSmartError::SessionExpired)?;
        if session.is_expired() {
            return Err(TaskSmartError::SessionExpired);
        }
        Ok(self.request(method, endpoint)?.bearer_auth(session.token))
    }

    /// Send a request and decode a JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            tracing::warn!(error = %err, "failed to decode response body");
            TaskSmartError::InvalidResponse(format!("unexpected response body: {err}"))
        })
    }

    /// Send a request whose response body is not needed
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await?;
        Ok(())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        tracing::debug!(%method, %path, "sending request");

        let response = self.http_client.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ApiErrorBody>(&body)
            .ok()
            .and_then(ApiErrorBody::into_message);
        tracing::warn!(
            %method,
            %path,
            status = status.as_u16(),
            message = message.as_deref().unwrap_or("-"),
            "request failed"
        );
        Err(TaskSmartError::from_status(status, message))
    }
}
