//! HTTP surface mapping requests onto the task store.
//!
//! Handlers stay thin: parse, delegate, shape. Filtering happens here rather
//! than in the store because it is a read-side concern of the list endpoint,
//! applied to the store's snapshot in the order status then text.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::store::{CreateTask, Task, TaskPatch, TaskStore};

/// Shared handle to the injected store.
pub type SharedStore = Arc<RwLock<TaskStore>>;

/// Status filter accepted by the list endpoint. Absent or `all` means no
/// filtering.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !task.done,
            StatusFilter::Completed => task.done,
        }
    }
}

/// Query parameters for `GET /tasks`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<StatusFilter>,
    pub q: Option<String>,
}

/// Build the router over an injected store handle.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", patch(update_task).delete(delete_task))
        .with_state(store)
}

async fn list_tasks(
    State(store): State<SharedStore>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Task>> {
    let snapshot = store.read().await.list();
    let status = params.status.unwrap_or_default();
    let needle = params.q.as_deref().unwrap_or("").to_lowercase();
    let tasks: Vec<Task> = snapshot
        .into_iter()
        .filter(|t| status.matches(t))
        .filter(|t| {
            needle.is_empty()
                || t.title.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
        })
        .collect();
    tracing::debug!(count = tasks.len(), "listed tasks");
    Json(tasks)
}

async fn create_task(
    State(store): State<SharedStore>,
    Json(input): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = store.write().await.create(&input.title, &input.description)?;
    tracing::info!(id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    let task = store.write().await.update(&id, patch)?;
    tracing::info!(id = %task.id, done = task.done, "task updated");
    Ok(Json(task))
}

async fn delete_task(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let task = store.write().await.delete(&id)?;
    tracing::info!(id = %task.id, "task deleted");
    Ok(Json(task))
}
