/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public TaskSmart client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{AuthManager, SessionData, SessionManager};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    DEFAULT_BASE_URL,
    GENERIC_ERROR_MESSAGE,
    Result,
    TaskSmartClient,
    TaskSmartError,
};

// Re-export all types
pub use types::*;
