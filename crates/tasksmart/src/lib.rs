/*
[INPUT]:  Public API exports for the tasksmart crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod banner;
pub mod config;
pub mod onboarding;
pub mod state;
pub mod summary;
pub mod task_cache;
pub mod theme;

// Re-export main types for convenience
pub use config::AppConfig;
pub use onboarding::{RegistrationFlow, TransferOutcome};
pub use state::LocalStore;
pub use summary::{TaskSummary, summarize};
pub use task_cache::TaskCache;
pub use theme::Theme;
