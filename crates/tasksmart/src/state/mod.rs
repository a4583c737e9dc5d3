/*
[INPUT]:  Local data directory
[OUTPUT]: Persisted key/value state shared by the CLI and TUI
[POS]:    State layer root
[UPDATE]: When adding persisted keys
*/

pub mod storage;

pub use storage::{GuestPreferences, LocalStore, keys};
