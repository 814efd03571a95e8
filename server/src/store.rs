//! In-memory task store — the single authority over the task collection.
//!
//! # Design
//! `TaskStore` is a plain owned value with synchronous methods; the HTTP
//! layer wraps it in `Arc<RwLock<..>>` and injects it into the router, so
//! tests get isolated stores and a persistence backend could later slot in
//! behind the same interface. Methods return typed errors carrying an HTTP
//! status hint, which the API layer renders without inspecting variants.
//!
//! Serialized access comes entirely from the enclosing lock; the store
//! itself is not safe under parallel writers.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Maximum accepted title length, counted in characters after trimming.
pub const MAX_TITLE_LEN: usize = 120;

/// A single tracked task.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Decimal string of the store's creation counter. Never reused.
    pub id: String,
    pub title: String,
    pub description: String,
    pub done: bool,
    /// Epoch milliseconds, stamped once at creation.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// Request payload for creating a task. `done` is not accepted here; new
/// tasks always start open.
#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Partial update. Absent fields are left untouched; `id` and `createdAt`
/// are not patchable.
#[derive(Debug, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,
}

/// Errors raised by store operations, each carrying an HTTP status hint for
/// the API boundary.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// Title missing, whitespace-only, or longer than [`MAX_TITLE_LEN`].
    #[error("{0}")]
    InvalidTitle(&'static str),

    /// No task with the referenced id exists.
    #[error("Task not found.")]
    NotFound,
}

impl StoreError {
    /// Status hint consumed verbatim by the API layer; errors without a
    /// hint fall back to 500 there.
    pub fn status_hint(&self) -> Option<u16> {
        match self {
            StoreError::InvalidTitle(_) => Some(400),
            StoreError::NotFound => Some(404),
        }
    }
}

/// The canonical task collection plus the id counter.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Snapshot of all tasks, newest first. Tasks stamped in the same
    /// millisecond may appear in arbitrary relative order. Later mutation
    /// of the store never affects a returned snapshot.
    #[must_use]
    pub fn list(&self) -> Vec<Task> {
        let mut snapshot = self.tasks.clone();
        snapshot.sort_by_key(|t| std::cmp::Reverse(t.created_at));
        snapshot
    }

    /// Create a task from raw input, trimming both fields.
    pub fn create(&mut self, title: &str, description: &str) -> Result<Task, StoreError> {
        let title = validated_title(title)?;
        let task = Task {
            id: self.next_id.to_string(),
            title,
            description: description.trim().to_string(),
            done: false,
            created_at: Utc::now().timestamp_millis(),
        };
        self.next_id += 1;
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Merge a partial patch onto an existing task, last-write-wins per
    /// field. A patched title re-runs the same validation as `create`; the
    /// task is left untouched when validation fails.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Task, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound)?;
        if let Some(title) = patch.title {
            task.title = validated_title(&title)?;
        }
        if let Some(description) = patch.description {
            task.description = description.trim().to_string();
        }
        if let Some(done) = patch.done {
            task.done = done;
        }
        Ok(task.clone())
    }

    /// Remove a task permanently, returning its last known state.
    pub fn delete(&mut self, id: &str) -> Result<Task, StoreError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound)?;
        Ok(self.tasks.remove(idx))
    }
}

fn validated_title(raw: &str) -> Result<String, StoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidTitle("Title is required."));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(StoreError::InvalidTitle(
            "Title must be 120 characters or fewer.",
        ));
    }
    Ok(trimmed.to_string())
}
