/*
[INPUT]:  Task payloads and the session bearer token
[OUTPUT]: Task records created, updated, completed or deleted on the backend
[POS]:    HTTP layer - task endpoints (require an authenticated or guest session)
[UPDATE]: When adding new task endpoints or changing payload shapes
*/

use reqwest::Method;

use crate::http::{Result, TaskSmartClient, TaskSmartError};
use crate::types::{
    CreateTaskRequest, ProcessTaskRequest, Task, TaskListResponse, UpdateTaskRequest,
};

impl TaskSmartClient {
    /// List tasks owned by the current session
    ///
    /// GET /api/tasks
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let builder = self.authed_request(Method::GET, "/api/tasks")?;
        let response: TaskListResponse = self.send_json(builder).await?;
        Ok(response.into_tasks())
    }

    /// Create a task
    ///
    /// POST /api/tasks
    pub async fn create_task(&self, req: &CreateTaskRequest) -> Result<Task> {
        if req.title.trim().is_empty() {
            return Err(TaskSmartError::Validation("task title cannot be empty".to_string()));
        }
        let builder = self.authed_request(Method::POST, "/api/tasks")?.json(req);
        self.send_json(builder).await
    }

    /// Update fields of an existing task
    ///
    /// PUT /api/tasks/{id}
    pub async fn update_task(&self, id: &str, req: &UpdateTaskRequest) -> Result<Task> {
        let endpoint = format!("/api/tasks/{}", encode_segment(id));
        let builder = self.authed_request(Method::PUT, &endpoint)?.json(req);
        self.send_json(builder).await
    }

    /// Mark a task as completed
    ///
    /// PATCH /api/tasks/{id}/complete
    pub async fn complete_task(&self, id: &str) -> Result<Task> {
        let endpoint = format!("/api/tasks/{}/complete", encode_segment(id));
        let builder = self.authed_request(Method::PATCH, &endpoint)?;
        self.send_json(builder).await
    }

    /// Delete a task
    ///
    /// DELETE /api/tasks/{id}
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        let endpoint = format!("/api/tasks/{}", encode_segment(id));
        let builder = self.authed_request(Method::DELETE, &endpoint)?;
        self.send_empty(builder).await
    }

    /// Let the backend turn a free-text line into a structured task
    ///
    /// POST /api/tasks/process
    pub async fn process_task(&self, text: &str) -> Result<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TaskSmartError::Validation("task text cannot be empty".to_string()));
        }
        let req = ProcessTaskRequest {
            text: text.to_string(),
        };
        let builder = self
            .authed_request(Method::POST, "/api/tasks/process")?
            .json(&req);
        self.send_json(builder).await
    }
}

fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}
