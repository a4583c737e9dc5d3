/*
[INPUT]:  Credentials and tokens returned by the TaskSmart API
[OUTPUT]: Shared session state and auth flows
[POS]:    Auth layer - handles TaskSmart authentication
[UPDATE]: When auth flow or session handling changes
*/

pub mod manager;
pub mod session;

pub use manager::AuthManager;
pub use session::{DEFAULT_SESSION_SECONDS, SessionData, SessionManager, token_expiry};
