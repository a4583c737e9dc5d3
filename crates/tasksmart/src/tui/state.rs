/*
[INPUT]:  AppState with task cache, auth session and local store
[OUTPUT]: AppState refresh helpers for tasks, filters, banners and sessions
[POS]:    TUI state refresh logic
[UPDATE]: When changing what a refresh or session switch updates
*/

use std::time::Instant;

use tracing::{debug, warn};

use tasksmart::banner::visible_banners;
use tasksmart::onboarding::RegistrationFlow;
use tasksmart::theme::Theme;

use super::app::AppState;

impl AppState {
    /// Load persisted preferences and the first task snapshot
    pub(super) async fn bootstrap(&mut self) {
        self.theme = Theme::load(&self.store).await;
        self.restore_guest_filter().await;
        self.refresh_tasks().await;

        if self.signed_in() && !self.is_guest() {
            let pending = RegistrationFlow::new(&self.auth, self.store.as_ref())
                .pending_transfer()
                .await;
            if let Some(pending) = pending {
                self.status_message = format!(
                    "{} guest tasks were not moved to your account; press [y] to retry",
                    pending.task_count
                );
            }
        }
    }

    /// Returns whether a new snapshot was fetched
    pub(super) async fn refresh_tasks(&mut self) -> bool {
        self.last_refresh = Instant::now();
        if !self.signed_in() {
            self.sync_from_cache().await;
            return false;
        }
        match self.cache.refresh().await {
            Ok(_) => {
                self.sync_from_cache().await;
                return true;
            }
            Err(err) if err.is_auth_error() => {
                warn!(error = %err, "session rejected by server");
                self.auth.logout();
                if let Err(err) = self.store.clear_session().await {
                    warn!(error = %err, "failed to clear saved session");
                }
                self.cache.clear().await;
                self.sync_from_cache().await;
                self.status_message = err.user_message();
            }
            Err(err) => self.status_message = format!("refresh failed: {}", err.user_message()),
        }
        false
    }

    /// Pull the cache's current snapshot and summary into the view
    pub(super) async fn sync_from_cache(&mut self) {
        self.snapshot = self.cache.snapshot().await;
        self.summary = self.cache.summary().await;
        self.apply_view();
        self.refresh_banners().await;
    }

    /// Re-filter the snapshot, keeping the selected task when it survives
    pub(super) fn apply_view(&mut self) {
        let selected_id = self.selected_task().map(|task| task.id.clone());
        self.tasks = self
            .filter
            .apply(&self.snapshot)
            .into_iter()
            .cloned()
            .collect();

        let index = selected_id
            .and_then(|id| self.tasks.iter().position(|task| task.id == id))
            .or_else(|| self.list_state.selected())
            .map(|index| index.min(self.tasks.len().saturating_sub(1)));
        if self.tasks.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(index.or(Some(0)));
        }
    }

    pub(super) async fn refresh_banners(&mut self) {
        self.banners = visible_banners(
            &self.store,
            self.is_guest(),
            self.snapshot.len(),
            self.config.ui.conversion_banner_threshold,
        )
        .await;
    }

    /// Persist the new session and reload everything tied to the account
    pub(super) async fn after_session_change(&mut self) {
        match self.auth.session().session() {
            Some(session) => {
                if let Err(err) = self.store.save_session(&session).await {
                    warn!(error = %err, "failed to save session");
                }
            }
            None => {
                if let Err(err) = self.store.clear_session().await {
                    warn!(error = %err, "failed to clear saved session");
                }
            }
        }
        self.cache.clear().await;
        self.restore_guest_filter().await;
        self.refresh_tasks().await;
    }

    async fn restore_guest_filter(&mut self) {
        if !self.is_guest() {
            return;
        }
        match self.store.guest_preferences().await {
            Ok(prefs) => {
                if let Some(filter) = prefs.filter {
                    debug!(%filter, "restored guest filter");
                    self.filter = filter;
                }
            }
            Err(err) => warn!(error = %err, "ignoring unreadable guest preferences"),
        }
    }

    /// Apply the highlighted sidebar entry as the task filter
    pub(super) async fn apply_sidebar_selection(&mut self) {
        let filters = self.sidebar_filters();
        let index = self.sidebar_state.selected().unwrap_or(0);
        if let Some(filter) = filters.get(index).cloned() {
            self.set_filter(filter).await;
        }
    }
}
