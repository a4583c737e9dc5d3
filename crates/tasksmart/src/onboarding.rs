/*
[INPUT]:  Registration details, the guest session being replaced, local store
[OUTPUT]: Registered session, guest task transfer outcome, cleared guest flags
[POS]:    Onboarding layer - guest to registered account conversion
[UPDATE]: When changing registration steps or transfer recovery
*/

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasksmart_client::{AuthManager, Result, SessionData, TransferResult};
use tracing::{debug, info, warn};

use crate::state::{LocalStore, keys};

/// Backend operations the registration flow depends on
#[async_trait]
pub trait AccountService: Send + Sync {
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<SessionData>;

    async fn transfer_guest_tasks(&self, guest_id: &str) -> Result<TransferResult>;

    /// Id of the signed-in registered user, `None` for guests or no session
    fn current_user_id(&self) -> Option<String>;
}

#[async_trait]
impl AccountService for AuthManager {
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<SessionData> {
        AuthManager::register(self, name, email, password).await
    }

    async fn transfer_guest_tasks(&self, guest_id: &str) -> Result<TransferResult> {
        AuthManager::transfer_guest_tasks(self, guest_id).await
    }

    fn current_user_id(&self) -> Option<String> {
        self.session()
            .session()
            .filter(|s| !s.is_guest() && !s.is_expired())
            .map(|s| s.user.id)
    }
}

/// The guest session in use when registration started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestContext {
    pub guest_id: String,
    pub task_count: usize,
}

impl GuestContext {
    /// `None` unless `session` is a guest session
    pub fn from_session(session: Option<&SessionData>, task_count: usize) -> Option<Self> {
        session.filter(|s| s.is_guest()).map(|s| Self {
            guest_id: s.user.id.clone(),
            task_count,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Move the guest's tasks into the new account
    pub transfer_guest_tasks: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Registration did not start from a guest session
    NotGuest,
    /// The user opted out of moving their guest tasks
    NotRequested,
    NoGuestTasks,
    Transferred { count: usize },
    /// Registration succeeded but the transfer did not; a retry is queued
    Failed { message: String },
}

#[derive(Debug, Clone)]
pub struct RegistrationReport {
    pub session: SessionData,
    pub transfer: TransferOutcome,
}

/// Transfer queued after a failed attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTransfer {
    pub guest_id: String,
    /// Account the guest tasks belong to once moved
    pub user_id: String,
    pub task_count: usize,
    pub attempts: u32,
    pub last_error: String,
    pub failed_at: DateTime<Utc>,
}

pub struct RegistrationFlow<'a, S: AccountService + ?Sized> {
    service: &'a S,
    store: &'a LocalStore,
}

impl<'a, S: AccountService + ?Sized> RegistrationFlow<'a, S> {
    pub fn new(service: &'a S, store: &'a LocalStore) -> Self {
        Self { service, store }
    }

    /// Register, optionally move guest tasks, clear guest flags, then call
    /// `on_success`.
    ///
    /// A registration error returns early: flags stay and `on_success` is
    /// not called. A transfer error does not fail the registration.
    pub async fn register<F>(
        &self,
        req: &RegistrationRequest,
        guest: Option<&GuestContext>,
        on_success: F,
    ) -> Result<RegistrationReport>
    where
        F: FnOnce(&RegistrationReport) + Send,
    {
        let session = self
            .service
            .register(&req.name, &req.email, &req.password)
            .await?;

        let transfer = match guest {
            None => TransferOutcome::NotGuest,
            Some(_) if !req.transfer_guest_tasks => TransferOutcome::NotRequested,
            Some(guest) if guest.task_count == 0 => TransferOutcome::NoGuestTasks,
            Some(guest) => self.transfer(guest, &session.user.id, 0).await,
        };

        if let Err(err) = self.store.clear_guest_flags().await {
            warn!(error = %err, "failed to persist cleared guest flags");
        }

        let report = RegistrationReport { session, transfer };
        info!(user_id = %report.session.user.id, transfer = ?report.transfer, "registration complete");
        on_success(&report);
        Ok(report)
    }

    /// Queued transfer owned by the signed-in user.
    ///
    /// A record queued by another account stays stored but is not returned.
    pub async fn pending_transfer(&self) -> Option<PendingTransfer> {
        let pending: PendingTransfer = match self.store.get_json(keys::PENDING_GUEST_TRANSFER).await {
            Ok(pending) => pending?,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable pending transfer");
                return None;
            }
        };
        let current = self.service.current_user_id()?;
        if pending.user_id != current {
            debug!(owner = %pending.user_id, current = %current, "pending transfer belongs to another account");
            return None;
        }
        Some(pending)
    }

    /// Re-run the signed-in user's queued transfer. `None` when nothing is
    /// pending for that user.
    pub async fn retry_pending_transfer(&self) -> Option<TransferOutcome> {
        let pending = self.pending_transfer().await?;
        let guest = GuestContext {
            guest_id: pending.guest_id.clone(),
            task_count: pending.task_count,
        };
        Some(self.transfer(&guest, &pending.user_id, pending.attempts).await)
    }

    async fn transfer(
        &self,
        guest: &GuestContext,
        user_id: &str,
        previous_attempts: u32,
    ) -> TransferOutcome {
        match self.service.transfer_guest_tasks(&guest.guest_id).await {
            Ok(result) => {
                if let Err(err) = self.store.remove(keys::PENDING_GUEST_TRANSFER).await {
                    warn!(error = %err, "failed to clear pending transfer");
                }
                TransferOutcome::Transferred {
                    count: result.transferred,
                }
            }
            Err(err) => {
                let message = err.user_message();
                warn!(guest_id = %guest.guest_id, error = %err, "guest task transfer failed");
                let pending = PendingTransfer {
                    guest_id: guest.guest_id.clone(),
                    user_id: user_id.to_string(),
                    task_count: guest.task_count,
                    attempts: previous_attempts + 1,
                    last_error: message.clone(),
                    failed_at: Utc::now(),
                };
                if let Err(err) = self
                    .store
                    .set_json(keys::PENDING_GUEST_TRANSFER, &pending)
                    .await
                {
                    warn!(error = %err, "failed to queue guest transfer retry");
                }
                TransferOutcome::Failed { message }
            }
        }
    }
}
