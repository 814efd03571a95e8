//! Stateless HTTP request builder and response parser for the task API.
//!
//! # Design
//! `TaskApiClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an [`HttpRequest`] and a `parse_*` method that consumes an
//! [`HttpResponse`]; the host executes the round-trip in between. The sync
//! layer composes these into optimistic-update flows.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTask, ListView, Task, TaskPatch};

/// Synchronous, stateless client for the task API.
#[derive(Debug, Clone)]
pub struct TaskApiClient {
    base_url: String,
}

impl TaskApiClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET /tasks` with the view's filter parameters.
    #[must_use]
    pub fn build_list_tasks(&self, view: &ListView) -> HttpRequest {
        let query = view.query_string();
        let url = if query.is_empty() {
            format!("{}/tasks", self.base_url)
        } else {
            format!("{}/tasks?{query}", self.base_url)
        };
        HttpRequest::bare(HttpMethod::Get, url)
    }

    /// `POST /tasks`.
    pub fn build_create_task(&self, input: &CreateTask) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::json(
            HttpMethod::Post,
            format!("{}/tasks", self.base_url),
            body,
        ))
    }

    /// `PATCH /tasks/{id}` carrying only the patch's present fields.
    pub fn build_update_task(&self, id: &str, patch: &TaskPatch) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(patch).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::json(
            HttpMethod::Patch,
            format!("{}/tasks/{id}", self.base_url),
            body,
        ))
    }

    /// `DELETE /tasks/{id}`.
    #[must_use]
    pub fn build_delete_task(&self, id: &str) -> HttpRequest {
        HttpRequest::bare(HttpMethod::Delete, format!("{}/tasks/{id}", self.base_url))
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response, 201)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// The delete endpoint echoes the removed task's last known state.
    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant,
/// extracting the server's `{"error": ...}` message when present.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let message = error_message(&response.body);
    if response.status == 404 {
        return Err(ApiError::NotFound { message });
    }
    Err(ApiError::Server {
        status: response.status,
        message,
    })
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.as_str().map(str::to_string))
}
