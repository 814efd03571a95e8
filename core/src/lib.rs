//! Client core for the task tracker: a deterministic sync layer over the
//! task API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - [`TaskApiClient`] is stateless — it holds only `base_url` — and splits
//!   each operation into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - [`SyncController`] layers the optimistic-update protocol on top: it
//!   mirrors server state, applies mutations locally before the round trip,
//!   and reconciles or rolls back when the host feeds the response back.
//! - DTOs are defined independently from the server crate; the live
//!   integration test catches schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod sync;
pub mod types;

pub use client::TaskApiClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use sync::{
    Notice, NoticeKind, Outcome, PendingAction, Refresh, RefreshOutcome, SyncController, SyncError,
};
pub use types::{CreateTask, ListView, StatusFilter, Task, TaskPatch};
