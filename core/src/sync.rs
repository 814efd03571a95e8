//! Optimistic-update sync controller.
//!
//! # Overview
//! [`SyncController`] keeps a local mirror of the server's task list and
//! applies each mutation optimistically before the round trip completes.
//! Every user action follows the same three-state protocol: the mutation is
//! applied locally and recorded as a [`PendingAction`], the host executes
//! the returned request, and the completion call resolves the action to
//! confirmed or rolled-back, yielding an [`Outcome`] with a [`Notice`] for
//! the UI's status region.
//!
//! # Design
//! - At most one mutation is in flight; beginning another while one is
//!   pending fails with [`SyncError::ActionPending`], so a completion can
//!   never be attributed to the wrong action.
//! - Full-list refreshes carry a generation token. A response belonging to
//!   a superseded fetch is discarded instead of clobbering newer state.
//! - Failed creates fall back to full reconciliation (re-fetch) because the
//!   failure may have left more than one divergence between mirror and
//!   server; failed toggles and deletes restore the pre-action snapshot
//!   directly.

use uuid::Uuid;

use crate::client::TaskApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateTask, ListView, StatusFilter, Task, TaskPatch};

/// Kind of a transient status notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient, user-visible status message. Error notices carry the
/// server's message verbatim when one was available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: &str) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.to_string(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            kind: NoticeKind::Error,
            message,
        }
    }
}

/// A mutation that has been applied to the local mirror and awaits the
/// server's verdict. Each variant carries its rollback material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// A placeholder task sits at the front of the mirror under `temp_id`.
    Create { temp_id: String },
    /// `done` was flipped in place; `snapshot` restores the mirror.
    Toggle { id: String, snapshot: Vec<Task> },
    /// The task was removed from the mirror; `snapshot` restores it.
    Delete { id: String, snapshot: Vec<Task> },
}

/// A full-list fetch tagged with the generation it belongs to. Pass the
/// generation back to [`SyncController::apply_refresh`] with the response.
#[derive(Debug)]
pub struct Refresh {
    pub generation: u64,
    pub request: HttpRequest,
}

/// How a refresh response was handled.
#[derive(Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The mirror was replaced wholesale with the authoritative list.
    Applied,
    /// The response belonged to a superseded fetch; the mirror is untouched.
    Stale,
}

/// Terminal state of a completed mutation.
#[derive(Debug)]
pub enum Outcome {
    /// The server confirmed the optimistic mutation.
    Confirmed(Notice),
    /// The mutation was rolled back to the pre-action snapshot.
    RolledBack(Notice),
    /// The optimistic entry was discarded; execute the enclosed request and
    /// feed the response to [`SyncController::apply_refresh`] to restore
    /// consistency.
    RefreshRequired { notice: Notice, refresh: Refresh },
}

/// Errors raised by the controller itself, before any network round trip.
#[derive(Debug)]
pub enum SyncError {
    /// Local fast-fail: the trimmed title is empty.
    EmptyTitle,
    /// A mutation is already awaiting its response.
    ActionPending,
    /// The referenced task is not in the local mirror.
    UnknownTask,
    /// The completion call does not match the pending action.
    NoPendingAction,
    /// The request payload could not be built.
    Api(ApiError),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::EmptyTitle => write!(f, "Title is required."),
            SyncError::ActionPending => write!(f, "another action is awaiting its response"),
            SyncError::UnknownTask => write!(f, "task is not in the local list"),
            SyncError::NoPendingAction => write!(f, "no matching action awaits a response"),
            SyncError::Api(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SyncError {}

/// Client-side state holder mirroring the server's task list.
///
/// The mirror is a cache, never authoritative; reconciliation always favors
/// the server's response. The controller performs no I/O — the host
/// executes each returned [`HttpRequest`] and feeds the response back.
#[derive(Debug)]
pub struct SyncController {
    client: TaskApiClient,
    tasks: Vec<Task>,
    view: ListView,
    pending: Option<PendingAction>,
    refresh_generation: u64,
}

impl SyncController {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: TaskApiClient::new(base_url),
            tasks: Vec::new(),
            view: ListView::default(),
            pending: None,
            refresh_generation: 0,
        }
    }

    /// The local mirror, in server order (newest first) with any optimistic
    /// placeholder at the front.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The current navigational state (status filter and search text).
    #[must_use]
    pub fn view(&self) -> &ListView {
        &self.view
    }

    /// The mutation currently awaiting its response, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    // --- reads ---

    /// Build a full-list fetch for the current view.
    pub fn refresh(&mut self) -> Refresh {
        self.refresh_generation += 1;
        Refresh {
            generation: self.refresh_generation,
            request: self.client.build_list_tasks(&self.view),
        }
    }

    /// Change the status filter; returns the superseding fetch.
    pub fn set_status(&mut self, status: StatusFilter) -> Refresh {
        self.view.status = status;
        self.refresh()
    }

    /// Change the search text; returns the superseding fetch.
    pub fn set_search(&mut self, q: &str) -> Refresh {
        self.view.q = q.to_string();
        self.refresh()
    }

    /// Replace the mirror wholesale with the authoritative list, unless the
    /// response belongs to a superseded fetch.
    pub fn apply_refresh(
        &mut self,
        generation: u64,
        response: HttpResponse,
    ) -> Result<RefreshOutcome, ApiError> {
        if generation != self.refresh_generation {
            return Ok(RefreshOutcome::Stale);
        }
        self.tasks = self.client.parse_list_tasks(response)?;
        Ok(RefreshOutcome::Applied)
    }

    // --- create ---

    /// Validate locally, insert a placeholder at the front of the mirror,
    /// and return the create request.
    pub fn begin_create(
        &mut self,
        title: &str,
        description: &str,
    ) -> Result<HttpRequest, SyncError> {
        if self.pending.is_some() {
            return Err(SyncError::ActionPending);
        }
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(SyncError::EmptyTitle);
        }
        let input = CreateTask {
            title: title.to_string(),
            description: description.to_string(),
        };
        let request = self.client.build_create_task(&input).map_err(SyncError::Api)?;

        let temp_id = format!("tmp-{}", Uuid::new_v4());
        self.tasks.insert(
            0,
            Task {
                id: temp_id.clone(),
                title: trimmed.to_string(),
                description: description.trim().to_string(),
                done: false,
                created_at: 0,
            },
        );
        self.pending = Some(PendingAction::Create { temp_id });
        Ok(request)
    }

    /// Resolve a pending create: replace the placeholder with the
    /// authoritative task, or discard it and request full reconciliation.
    pub fn complete_create(&mut self, response: HttpResponse) -> Result<Outcome, SyncError> {
        let temp_id = match self.pending.take() {
            Some(PendingAction::Create { temp_id }) => temp_id,
            other => {
                self.pending = other;
                return Err(SyncError::NoPendingAction);
            }
        };
        match self.client.parse_create_task(response) {
            Ok(task) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == temp_id) {
                    *slot = task;
                }
                Ok(Outcome::Confirmed(Notice::success("Task added.")))
            }
            Err(err) => {
                self.tasks.retain(|t| t.id != temp_id);
                let message = err
                    .server_message()
                    .unwrap_or("Failed to create task.")
                    .to_string();
                Ok(Outcome::RefreshRequired {
                    notice: Notice::error(message),
                    refresh: self.refresh(),
                })
            }
        }
    }

    // --- toggle ---

    /// Flip `done` locally and return a patch carrying only the new value.
    pub fn begin_toggle(&mut self, id: &str) -> Result<HttpRequest, SyncError> {
        if self.pending.is_some() {
            return Err(SyncError::ActionPending);
        }
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(SyncError::UnknownTask)?;
        let patch = TaskPatch {
            done: Some(!self.tasks[idx].done),
            ..TaskPatch::default()
        };
        let request = self.client.build_update_task(id, &patch).map_err(SyncError::Api)?;

        let snapshot = self.tasks.clone();
        self.tasks[idx].done = !self.tasks[idx].done;
        self.pending = Some(PendingAction::Toggle {
            id: id.to_string(),
            snapshot,
        });
        Ok(request)
    }

    /// Resolve a pending toggle: adopt the authoritative task, or restore
    /// the pre-toggle snapshot.
    pub fn complete_toggle(&mut self, response: HttpResponse) -> Result<Outcome, SyncError> {
        let snapshot = match self.pending.take() {
            Some(PendingAction::Toggle { snapshot, .. }) => snapshot,
            other => {
                self.pending = other;
                return Err(SyncError::NoPendingAction);
            }
        };
        match self.client.parse_update_task(response) {
            Ok(task) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
                    *slot = task;
                }
                Ok(Outcome::Confirmed(Notice::success("Task updated.")))
            }
            Err(err) => {
                self.tasks = snapshot;
                let message = err
                    .server_message()
                    .unwrap_or("Failed to update task.")
                    .to_string();
                Ok(Outcome::RolledBack(Notice::error(message)))
            }
        }
    }

    // --- delete ---

    /// Remove the task from the mirror and return the delete request.
    pub fn begin_delete(&mut self, id: &str) -> Result<HttpRequest, SyncError> {
        if self.pending.is_some() {
            return Err(SyncError::ActionPending);
        }
        if !self.tasks.iter().any(|t| t.id == id) {
            return Err(SyncError::UnknownTask);
        }
        let snapshot = self.tasks.clone();
        self.tasks.retain(|t| t.id != id);
        self.pending = Some(PendingAction::Delete {
            id: id.to_string(),
            snapshot,
        });
        Ok(self.client.build_delete_task(id))
    }

    /// Resolve a pending delete: confirm, or restore the pre-delete
    /// snapshot.
    pub fn complete_delete(&mut self, response: HttpResponse) -> Result<Outcome, SyncError> {
        let snapshot = match self.pending.take() {
            Some(PendingAction::Delete { snapshot, .. }) => snapshot,
            other => {
                self.pending = other;
                return Err(SyncError::NoPendingAction);
            }
        };
        match self.client.parse_delete_task(response) {
            Ok(_) => Ok(Outcome::Confirmed(Notice::success("Task deleted."))),
            Err(err) => {
                self.tasks = snapshot;
                let message = err
                    .server_message()
                    .unwrap_or("Failed to delete task.")
                    .to_string();
                Ok(Outcome::RolledBack(Notice::error(message)))
            }
        }
    }
}
