/*
[INPUT]:  Authenticated client, task cache, local store and log buffer
[OUTPUT]: Ratatui-based TUI for tasks, summaries, accounts and logs
[POS]:    TUI module for the tasksmart binary
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

mod app;
mod events;
mod runtime;
mod state;
mod terminal;
pub mod ui;

pub use runtime::{
    LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory, run_tui_with_log,
};
