/*
[INPUT]:  TaskSmart client and task mutations issued by the UI
[OUTPUT]: Read-through task snapshot with memoised summary
[POS]:    Data layer - cached copy of the backend task list
[UPDATE]: When adding task operations or changing invalidation rules
*/

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tasksmart_client::{CreateTaskRequest, Result, Task, TaskSmartClient, UpdateTaskRequest};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::summary::{SummaryMemo, TaskSummary};

#[derive(Debug)]
struct CacheState {
    snapshot: Arc<Vec<Task>>,
    memo: SummaryMemo,
    stale: bool,
    last_refresh: Option<DateTime<Utc>>,
}

/// Cached copy of the signed-in user's tasks.
///
/// Every mutation goes to the backend first, then invalidates and refetches.
#[derive(Debug)]
pub struct TaskCache {
    client: TaskSmartClient,
    state: Mutex<CacheState>,
}

impl TaskCache {
    pub fn new(client: TaskSmartClient) -> Self {
        Self {
            client,
            state: Mutex::new(CacheState {
                snapshot: Arc::new(Vec::new()),
                memo: SummaryMemo::new(),
                stale: true,
                last_refresh: None,
            }),
        }
    }

    pub fn client(&self) -> &TaskSmartClient {
        &self.client
    }

    pub async fn snapshot(&self) -> Arc<Vec<Task>> {
        Arc::clone(&self.state.lock().await.snapshot)
    }

    /// Summary of the current snapshot, recomputed only after it changes
    pub async fn summary(&self) -> Arc<TaskSummary> {
        let mut state = self.state.lock().await;
        let snapshot = Arc::clone(&state.snapshot);
        state.memo.get(&snapshot)
    }

    pub async fn is_stale(&self) -> bool {
        self.state.lock().await.stale
    }

    pub async fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.state.lock().await.last_refresh
    }

    pub async fn invalidate(&self) {
        self.state.lock().await.stale = true;
    }

    /// Drop cached tasks, e.g. after logout
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.snapshot = Arc::new(Vec::new());
        state.stale = true;
        state.last_refresh = None;
    }

    /// Fetch the task list and swap in a new snapshot.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<Arc<Vec<Task>>> {
        let tasks = match self.client.list_tasks().await {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(error = %err, "task refresh failed; keeping previous snapshot");
                return Err(err);
            }
        };

        let mut state = self.state.lock().await;
        state.snapshot = Arc::new(tasks);
        state.stale = false;
        state.last_refresh = Some(Utc::now());
        debug!(count = state.snapshot.len(), "task snapshot refreshed");
        Ok(Arc::clone(&state.snapshot))
    }

    /// Refresh only when invalidated or never loaded
    pub async fn ensure_fresh(&self) -> Result<Arc<Vec<Task>>> {
        if self.is_stale().await {
            return self.refresh().await;
        }
        Ok(self.snapshot().await)
    }

    /// Number of tasks, loading the list first if it was never fetched.
    ///
    /// Falls back to the cached count when the fetch fails.
    pub async fn task_count(&self) -> usize {
        match self.ensure_fresh().await {
            Ok(tasks) => tasks.len(),
            Err(_) => self.snapshot().await.len(),
        }
    }

    pub async fn create(&self, req: &CreateTaskRequest) -> Result<Task> {
        let task = self.client.create_task(req).await?;
        self.after_mutation().await;
        Ok(task)
    }

    pub async fn update(&self, id: &str, req: &UpdateTaskRequest) -> Result<Task> {
        let task = self.client.update_task(id, req).await?;
        self.after_mutation().await;
        Ok(task)
    }

    pub async fn complete(&self, id: &str) -> Result<Task> {
        let task = self.client.complete_task(id).await?;
        self.after_mutation().await;
        Ok(task)
    }

    /// Completed tasks are reopened through a regular update.
    pub async fn toggle_complete(&self, task: &Task) -> Result<Task> {
        if task.completed {
            let req = UpdateTaskRequest {
                completed: Some(false),
                ..UpdateTaskRequest::default()
            };
            self.update(&task.id, &req).await
        } else {
            self.complete(&task.id).await
        }
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete_task(id).await?;
        self.after_mutation().await;
        Ok(())
    }

    /// Create a task from free text parsed by the backend
    pub async fn quick_add(&self, text: &str) -> Result<Task> {
        let task = self.client.process_task(text).await?;
        self.after_mutation().await;
        Ok(task)
    }

    // The mutation already succeeded; a failed refetch leaves the cache stale
    // so the next tick retries it.
    async fn after_mutation(&self) {
        self.invalidate().await;
        if let Err(err) = self.refresh().await {
            warn!(error = %err, "refetch after mutation failed");
        }
    }
}
