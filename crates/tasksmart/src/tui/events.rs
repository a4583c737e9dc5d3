/*
[INPUT]:  Crossterm key codes
[OUTPUT]: AppState actions and modal submissions
[POS]:    TUI event routing
[UPDATE]: When adding hotkeys or modal flows
*/

use crossterm::event::KeyCode;

use super::app::{ActiveModal, AppState, Focus, Tab};
use super::ui::modal::ModalAction;

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) async fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    if app.active_modal.is_some() {
        handle_modal_key_event(app, key).await;
        return false;
    }

    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('1') => app.set_tab(Tab::Tasks),
        KeyCode::Char('2') => app.set_tab(Tab::Logs),
        KeyCode::Tab | KeyCode::Left | KeyCode::Right => app.toggle_focus(),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Enter => match app.focus {
            Focus::Sidebar => app.apply_sidebar_selection().await,
            Focus::Tasks => app.open_edit_task(),
        },
        KeyCode::Char('r') => {
            if app.refresh_tasks().await {
                app.status_message = "tasks refreshed".to_string();
            }
        }
        KeyCode::Char('n') => app.open_create_task(),
        KeyCode::Char('a') => app.open_quick_add(),
        KeyCode::Char('e') => app.open_edit_task(),
        KeyCode::Char('c') | KeyCode::Char(' ') => app.toggle_selected().await,
        KeyCode::Char('d') => app.open_confirm_delete(),
        KeyCode::Char('t') => app.toggle_theme().await,
        KeyCode::Char('x') => app.dismiss_banner().await,
        KeyCode::Char('i') => app.open_login(),
        KeyCode::Char('u') => app.open_register().await,
        KeyCode::Char('g') => app.start_guest().await,
        KeyCode::Char('p') => app.open_forgot_password(),
        KeyCode::Char('o') => app.logout().await,
        KeyCode::Char('y') => app.retry_transfer().await,
        _ => {}
    }
    false
}

async fn handle_modal_key_event(app: &mut AppState, key: KeyCode) {
    let Some(mut active) = app.active_modal.take() else {
        return;
    };

    let action = match &mut active {
        ActiveModal::TaskForm(modal) => modal.handle_key(key),
        ActiveModal::QuickAdd(modal) => modal.handle_key(key),
        ActiveModal::ConfirmDelete(modal) => modal.handle_key(key),
        ActiveModal::Login(modal) => modal.handle_key(key),
        ActiveModal::Register(modal) => modal.handle_key(key),
        ActiveModal::ForgotPassword(modal) => modal.handle_key(key),
        ActiveModal::ResetPassword(modal) => modal.handle_key(key),
    };

    match action {
        ModalAction::Cancel => {}
        ModalAction::None => app.active_modal = Some(active),
        ModalAction::Secondary => match active {
            ActiveModal::Login(_) => app.open_forgot_password(),
            ActiveModal::ForgotPassword(_) => app.open_reset_password(),
            other => app.active_modal = Some(other),
        },
        ModalAction::Submit => {
            let result = submit(app, &active).await;
            match result {
                Ok(()) => {}
                Err(message) => {
                    active.modal_mut().set_error(message);
                    app.active_modal = Some(active);
                }
            }
        }
    }
}

async fn submit(app: &mut AppState, active: &ActiveModal) -> Result<(), String> {
    match active {
        ActiveModal::TaskForm(modal) => match modal.editing() {
            Some(original) => app.submit_edit_task(modal, original).await,
            None => app.submit_create_task(modal).await,
        },
        ActiveModal::QuickAdd(modal) => app.submit_quick_add(modal.text()).await,
        ActiveModal::ConfirmDelete(modal) => app.submit_delete(modal.task_id()).await,
        ActiveModal::Login(modal) => app.submit_login(modal.email(), modal.password()).await,
        ActiveModal::Register(modal) => app.submit_register(modal).await,
        ActiveModal::ForgotPassword(modal) => app.submit_forgot_password(modal.email()).await,
        ActiveModal::ResetPassword(modal) => app.submit_reset_password(modal).await,
    }
}
