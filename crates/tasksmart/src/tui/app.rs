/*
[INPUT]:  Auth manager, task cache, local store, log buffer, app config
[OUTPUT]: AppState for TUI rendering plus task and account actions
[POS]:    TUI app state and action handlers
[UPDATE]: When adding TUI actions or modal flows
*/

use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::widgets::ListState;
use tasksmart_client::{AuthManager, Task};
use tracing::{info, warn};

use tasksmart::banner::Banner;
use tasksmart::config::AppConfig;
use tasksmart::onboarding::{GuestContext, RegistrationFlow, RegistrationRequest, TransferOutcome};
use tasksmart::state::LocalStore;
use tasksmart::summary::{TaskFilter, TaskSummary};
use tasksmart::task_cache::TaskCache;
use tasksmart::theme::Theme;

use crate::tui::LogBufferHandle;
use crate::tui::ui::modal::{
    ConfirmDeleteModal, ForgotPasswordModal, LoginModal, Modal, QuickAddModal, RegisterModal,
    ResetPasswordModal, TaskFormModal,
};

pub(super) enum ActiveModal {
    TaskForm(TaskFormModal),
    QuickAdd(QuickAddModal),
    ConfirmDelete(ConfirmDeleteModal),
    Login(LoginModal),
    Register(RegisterModal),
    ForgotPassword(ForgotPasswordModal),
    ResetPassword(ResetPasswordModal),
}

impl ActiveModal {
    pub(super) fn modal(&self) -> &Modal {
        match self {
            ActiveModal::TaskForm(m) => m.modal(),
            ActiveModal::QuickAdd(m) => m.modal(),
            ActiveModal::ConfirmDelete(m) => m.modal(),
            ActiveModal::Login(m) => m.modal(),
            ActiveModal::Register(m) => m.modal(),
            ActiveModal::ForgotPassword(m) => m.modal(),
            ActiveModal::ResetPassword(m) => m.modal(),
        }
    }

    pub(super) fn modal_mut(&mut self) -> &mut Modal {
        match self {
            ActiveModal::TaskForm(m) => m.modal_mut(),
            ActiveModal::QuickAdd(m) => m.modal_mut(),
            ActiveModal::ConfirmDelete(m) => m.modal_mut(),
            ActiveModal::Login(m) => m.modal_mut(),
            ActiveModal::Register(m) => m.modal_mut(),
            ActiveModal::ForgotPassword(m) => m.modal_mut(),
            ActiveModal::ResetPassword(m) => m.modal_mut(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tab {
    Tasks,
    Logs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    Sidebar,
    Tasks,
}

pub(super) struct AppState {
    pub(super) config: AppConfig,
    pub(super) auth: AuthManager,
    pub(super) cache: Arc<TaskCache>,
    pub(super) store: Arc<LocalStore>,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) theme: Theme,
    pub(super) filter: TaskFilter,
    pub(super) summary: Arc<TaskSummary>,
    pub(super) snapshot: Arc<Vec<Task>>,
    /// Tasks matching `filter`, in backend order
    pub(super) tasks: Vec<Task>,
    pub(super) list_state: ListState,
    pub(super) sidebar_state: ListState,
    pub(super) focus: Focus,
    pub(super) current_tab: Tab,
    pub(super) banners: Vec<Banner>,
    pub(super) status_message: String,
    pub(super) last_refresh: Instant,
    pub(super) active_modal: Option<ActiveModal>,
}

impl AppState {
    pub(super) fn new(
        config: AppConfig,
        auth: AuthManager,
        cache: Arc<TaskCache>,
        store: Arc<LocalStore>,
        log_buffer: LogBufferHandle,
    ) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        let mut sidebar_state = ListState::default();
        sidebar_state.select(Some(0));
        let refresh_interval = config.refresh_interval();
        Self {
            config,
            auth,
            cache,
            store,
            log_buffer,
            theme: Theme::default(),
            filter: TaskFilter::All,
            summary: Arc::new(TaskSummary::default()),
            snapshot: Arc::new(Vec::new()),
            tasks: Vec::new(),
            list_state,
            sidebar_state,
            focus: Focus::Tasks,
            current_tab: Tab::Tasks,
            banners: Vec::new(),
            status_message: "Ready".to_string(),
            last_refresh: Instant::now() - refresh_interval - Duration::from_secs(1),
            active_modal: None,
        }
    }

    pub(super) fn signed_in(&self) -> bool {
        !self.auth.session().is_expired()
    }

    pub(super) fn is_guest(&self) -> bool {
        self.signed_in() && self.auth.session().is_guest()
    }

    pub(super) fn user_label(&self) -> String {
        match self.auth.session().user() {
            Some(user) if user.is_guest => "Guest".to_string(),
            Some(user) => match user.email {
                Some(email) => format!("{} <{email}>", user.name),
                None => user.name,
            },
            None => "Not signed in".to_string(),
        }
    }

    pub(super) fn selected_task(&self) -> Option<&Task> {
        let idx = self.list_state.selected()?;
        self.tasks.get(idx)
    }

    /// Sidebar entries: categories first, then priorities
    pub(super) fn sidebar_filters(&self) -> Vec<TaskFilter> {
        self.summary
            .categories
            .iter()
            .map(|entry| entry.filter.clone())
            .chain(self.summary.priorities.iter().map(|entry| entry.filter.clone()))
            .collect()
    }

    fn require_session(&mut self) -> bool {
        if self.signed_in() {
            return true;
        }
        self.status_message = "log in [i] or continue as guest [g] first".to_string();
        false
    }

    pub(super) fn open_create_task(&mut self) {
        if !self.require_session() {
            return;
        }
        let category = match &self.filter {
            TaskFilter::Category(category) => Some(category.clone()),
            _ => None,
        };
        self.active_modal = Some(ActiveModal::TaskForm(TaskFormModal::create(category)));
    }

    pub(super) fn open_edit_task(&mut self) {
        let Some(task) = self.selected_task() else {
            self.status_message = "no task selected".to_string();
            return;
        };
        let modal = TaskFormModal::edit(task);
        self.active_modal = Some(ActiveModal::TaskForm(modal));
    }

    pub(super) fn open_quick_add(&mut self) {
        if !self.require_session() {
            return;
        }
        self.active_modal = Some(ActiveModal::QuickAdd(QuickAddModal::new()));
    }

    pub(super) fn open_confirm_delete(&mut self) {
        let Some(task) = self.selected_task() else {
            self.status_message = "no task selected".to_string();
            return;
        };
        let modal = ConfirmDeleteModal::new(task);
        self.active_modal = Some(ActiveModal::ConfirmDelete(modal));
    }

    pub(super) fn open_login(&mut self) {
        self.active_modal = Some(ActiveModal::Login(LoginModal::new()));
    }

    pub(super) async fn open_register(&mut self) {
        let guest_tasks = if self.is_guest() {
            Some(self.cache.task_count().await)
        } else {
            None
        };
        self.active_modal = Some(ActiveModal::Register(RegisterModal::new(guest_tasks)));
    }

    pub(super) fn open_forgot_password(&mut self) {
        self.active_modal = Some(ActiveModal::ForgotPassword(ForgotPasswordModal::new()));
    }

    pub(super) fn open_reset_password(&mut self) {
        self.active_modal = Some(ActiveModal::ResetPassword(ResetPasswordModal::new()));
    }

    pub(super) async fn submit_create_task(&mut self, modal: &TaskFormModal) -> Result<(), String> {
        let req = modal.to_create_request()?;
        let task = self.cache.create(&req).await.map_err(|e| e.user_message())?;
        info!(task_id = %task.id, "task created");
        self.status_message = format!("task created: {}", task.title);
        self.sync_from_cache().await;
        Ok(())
    }

    pub(super) async fn submit_edit_task(&mut self, modal: &TaskFormModal, original: &Task) -> Result<(), String> {
        let req = modal.to_update_request(original)?;
        if req == Default::default() {
            self.status_message = "nothing changed".to_string();
            return Ok(());
        }
        let task = self
            .cache
            .update(&original.id, &req)
            .await
            .map_err(|e| e.user_message())?;
        self.status_message = format!("task updated: {}", task.title);
        self.sync_from_cache().await;
        Ok(())
    }

    pub(super) async fn submit_quick_add(&mut self, text: &str) -> Result<(), String> {
        if text.is_empty() {
            return Err("Type something to add".to_string());
        }
        let task = self.cache.quick_add(text).await.map_err(|e| e.user_message())?;
        self.status_message = format!("added \"{}\" ({} / {})", task.title, task.category, task.priority);
        self.sync_from_cache().await;
        Ok(())
    }

    pub(super) async fn submit_delete(&mut self, task_id: &str) -> Result<(), String> {
        self.cache.delete(task_id).await.map_err(|e| e.user_message())?;
        self.status_message = "task deleted".to_string();
        self.sync_from_cache().await;
        Ok(())
    }

    pub(super) async fn toggle_selected(&mut self) {
        let Some(task) = self.selected_task().cloned() else {
            self.status_message = "no task selected".to_string();
            return;
        };
        match self.cache.toggle_complete(&task).await {
            Ok(updated) => {
                self.status_message = if updated.completed {
                    format!("completed: {}", updated.title)
                } else {
                    format!("reopened: {}", updated.title)
                };
                self.sync_from_cache().await;
            }
            Err(err) => self.status_message = err.user_message(),
        }
    }

    pub(super) async fn submit_login(&mut self, email: &str, password: &str) -> Result<(), String> {
        let session = self
            .auth
            .login(email, password)
            .await
            .map_err(|e| e.user_message())?;
        self.status_message = format!("welcome back, {}", session.user.name);
        self.after_session_change().await;
        Ok(())
    }

    pub(super) async fn start_guest(&mut self) {
        if self.signed_in() && !self.is_guest() {
            self.status_message = "log out [o] before starting a guest session".to_string();
            return;
        }
        match self.auth.start_guest_session().await {
            Ok(_) => {
                self.status_message = "guest session started".to_string();
                self.after_session_change().await;
            }
            Err(err) => self.status_message = err.user_message(),
        }
    }

    pub(super) async fn submit_register(&mut self, modal: &RegisterModal) -> Result<(), String> {
        if !modal.passwords_match() {
            return Err("Passwords do not match".to_string());
        }
        let session = self.auth.session().session();
        let guest_tasks = match &session {
            Some(session) if session.is_guest() => self.cache.task_count().await,
            _ => 0,
        };
        let guest = GuestContext::from_session(session.as_ref(), guest_tasks);
        let req = RegistrationRequest {
            name: modal.name().to_string(),
            email: modal.email().to_string(),
            password: modal.password().to_string(),
            transfer_guest_tasks: modal.transfer_requested(),
        };

        let mut welcome = String::new();
        let report = {
            let flow = RegistrationFlow::new(&self.auth, self.store.as_ref());
            flow.register(&req, guest.as_ref(), |report| {
                welcome = format!("account created for {}", report.session.user.name);
            })
            .await
            .map_err(|e| e.user_message())?
        };

        self.status_message = match &report.transfer {
            TransferOutcome::Transferred { count } => format!("{welcome}; moved {count} tasks"),
            TransferOutcome::Failed { message } => {
                format!("{welcome}; moving guest tasks failed ({message}), press [y] to retry")
            }
            _ => welcome,
        };
        self.after_session_change().await;
        Ok(())
    }

    pub(super) async fn retry_transfer(&mut self) {
        let flow = RegistrationFlow::new(&self.auth, self.store.as_ref());
        let outcome = flow.retry_pending_transfer().await;
        self.status_message = match outcome {
            None => "no pending guest transfer".to_string(),
            Some(TransferOutcome::Transferred { count }) => format!("moved {count} guest tasks"),
            Some(TransferOutcome::Failed { message }) => format!("transfer still failing: {message}"),
            Some(other) => format!("transfer: {other:?}"),
        };
        self.refresh_tasks().await;
    }

    pub(super) async fn submit_forgot_password(&mut self, email: &str) -> Result<(), String> {
        let message = self
            .auth
            .request_password_reset(email)
            .await
            .map_err(|e| e.user_message())?;
        self.status_message = if message.is_empty() {
            "check your email for a reset link".to_string()
        } else {
            message
        };
        Ok(())
    }

    pub(super) async fn submit_reset_password(&mut self, modal: &ResetPasswordModal) -> Result<(), String> {
        if !modal.passwords_match() {
            return Err("Passwords do not match".to_string());
        }
        let message = self
            .auth
            .reset_password(modal.token(), modal.password())
            .await
            .map_err(|e| e.user_message())?;
        self.status_message = if message.is_empty() {
            "password updated; log in with your new password".to_string()
        } else {
            message
        };
        Ok(())
    }

    pub(super) async fn logout(&mut self) {
        self.auth.logout();
        if let Err(err) = self.store.clear_session().await {
            warn!(error = %err, "failed to clear saved session");
        }
        self.cache.clear().await;
        self.sync_from_cache().await;
        self.status_message = "logged out".to_string();
    }

    pub(super) async fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        if let Err(err) = self.theme.save(&self.store, self.is_guest()).await {
            warn!(error = %err, "failed to save theme");
        }
        self.status_message = format!("theme: {}", self.theme);
    }

    pub(super) async fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
        if self.is_guest() {
            let filter = self.filter.clone();
            if let Err(err) = self
                .store
                .update_guest_preferences(|prefs| prefs.filter = Some(filter))
                .await
            {
                warn!(error = %err, "failed to save guest filter");
            }
        }
        self.apply_view();
        self.status_message = format!("showing: {}", self.filter);
    }

    pub(super) async fn dismiss_banner(&mut self) {
        let Some(banner) = self.banners.first().copied() else {
            return;
        };
        if let Err(err) = banner.dismiss(&self.store).await {
            warn!(error = %err, "failed to save banner dismissal");
        }
        self.refresh_banners().await;
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        match self.focus {
            Focus::Tasks => step(&mut self.list_state, self.tasks.len(), delta),
            Focus::Sidebar => {
                let len = self.sidebar_filters().len();
                step(&mut self.sidebar_state, len, delta);
            }
        }
    }

    pub(super) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Tasks,
            Focus::Tasks => Focus::Sidebar,
        };
    }

    pub(super) fn set_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }
}

fn step(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, (len - 1) as isize) as usize;
    state.select(Some(next));
}
