/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod account;
pub mod client;
pub mod error;
pub mod tasks;

pub use error::{GENERIC_ERROR_MESSAGE, Result, TaskSmartError};

pub use client::{ClientConfig, DEFAULT_BASE_URL, TaskSmartClient};
