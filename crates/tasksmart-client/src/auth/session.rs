/*
[INPUT]:  Bearer tokens returned by auth endpoints and their user records
[OUTPUT]: Token retrieval, guest/registered status and expiration checks
[POS]:    Auth layer - session lifecycle management
[UPDATE]: When adding token refresh or changing storage strategy
[UPDATE]: Derive expiry from the JWT exp claim when present
*/

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use base64::{
    Engine as _,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::User;

/// Lifetime assumed for opaque (non-JWT) tokens.
pub const DEFAULT_SESSION_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Stored session with metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(token: String, user: User) -> Self {
        let expires_at = token_expiry(&token)
            .unwrap_or_else(|| Utc::now() + Duration::seconds(DEFAULT_SESSION_SECONDS));
        Self {
            token,
            user,
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn is_guest(&self) -> bool {
        self.user.is_guest
    }
}

/// Thread-safe session holder shared between the HTTP client and auth flows
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    data: Arc<RwLock<Option<SessionData>>>,
}

impl SessionManager {
    /// Create a new empty session manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly issued token
    pub fn set_session(&self, token: String, user: User) -> SessionData {
        let session = SessionData::new(token, user);
        *self.write() = Some(session.clone());
        session
    }

    /// Restore a previously persisted session
    pub fn restore(&self, session: SessionData) {
        *self.write() = Some(session);
    }

    /// Get the current token if available
    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|data| data.token.clone())
    }

    /// Check if the session is missing or past its expiry
    pub fn is_expired(&self) -> bool {
        match self.read().as_ref() {
            Some(data) => data.is_expired(),
            None => true,
        }
    }

    pub fn is_guest(&self) -> bool {
        self.read().as_ref().is_some_and(SessionData::is_guest)
    }

    pub fn user(&self) -> Option<User> {
        self.read().as_ref().map(|data| data.user.clone())
    }

    /// Get session data if available
    pub fn session(&self) -> Option<SessionData> {
        self.read().clone()
    }

    /// Clear the stored session
    pub fn clear(&self) {
        *self.write() = None;
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<SessionData>> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<SessionData>> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Read the `exp` claim from a JWT without verifying it.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload_b64 = token.trim().split('.').nth(1)?;
    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .or_else(|_| URL_SAFE.decode(payload_b64))
        .ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).ok()?;
    let exp = payload.get("exp")?.as_i64()?;
    DateTime::from_timestamp(exp, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_guest: bool) -> User {
        User {
            id: "u-1".to_string(),
            name: "Ada".to_string(),
            email: None,
            is_guest,
        }
    }

    fn make_test_jwt(exp: i64) -> String {
        let header = serde_json::json!({"alg": "none", "typ": "JWT"});
        let payload = serde_json::json!({"sub": "u-1", "exp": exp});
        let header_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header).unwrap());
        let payload_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());
        format!("{header_b64}.{payload_b64}.signature")
    }

    #[test]
    fn test_new_manager_is_empty() {
        let manager = SessionManager::new();
        assert!(manager.token().is_none());
        assert!(manager.is_expired());
        assert!(!manager.is_guest());
    }

    #[test]
    fn test_set_and_get_session() {
        let manager = SessionManager::new();
        manager.set_session("opaque-token".to_string(), user(true));

        assert_eq!(manager.token(), Some("opaque-token".to_string()));
        assert!(!manager.is_expired());
        assert!(manager.is_guest());
    }

    #[test]
    fn test_expiry_comes_from_jwt_claim() {
        let past = Utc::now().timestamp() - 60;
        let manager = SessionManager::new();
        let session = manager.set_session(make_test_jwt(past), user(false));

        assert_eq!(session.expires_at.timestamp(), past);
        assert!(manager.is_expired());
    }

    #[test]
    fn test_clones_share_state() {
        let manager = SessionManager::new();
        let shared = manager.clone();
        manager.set_session("token".to_string(), user(false));
        assert_eq!(shared.token(), Some("token".to_string()));

        shared.clear();
        assert!(manager.session().is_none());
    }

    #[test]
    fn test_token_expiry_rejects_opaque_tokens() {
        assert!(token_expiry("not-a-jwt").is_none());
        assert!(token_expiry("a.%%%.c").is_none());
    }
}
