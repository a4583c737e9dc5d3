/*
[INPUT]:  TUI app state for UI components
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When adding panels
*/

mod banner;
mod layout;
mod logs;
mod sidebar;
mod task_list;

pub mod modal;
pub(in crate::tui) mod palette;

pub(in crate::tui) use banner::draw_banners;
pub(in crate::tui) use layout::{centered_rect, draw_footer, draw_tabs};
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use sidebar::draw_sidebar;
pub(in crate::tui) use task_list::draw_task_list;
