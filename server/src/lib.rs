//! Minimal task tracker HTTP service.
//!
//! # Overview
//! An axum server over an in-memory [`store::TaskStore`]: create, list,
//! filter, search, patch, and delete short text tasks. Nothing survives a
//! restart; there is one process, one collection, and no authentication.
//!
//! # Design
//! - The store is an explicitly owned value injected into [`api::router`],
//!   never a module-level global, so each test builds an isolated instance.
//! - Store errors carry an HTTP status hint; the API layer renders them as
//!   `{"error": <message>}` without matching on variants.
//! - DTOs are defined independently from the client crate; the live
//!   integration test catches schema drift.

pub mod api;
pub mod config;
pub mod error;
pub mod store;

pub use api::{router, ListParams, SharedStore, StatusFilter};
pub use store::{CreateTask, StoreError, Task, TaskPatch, TaskStore};

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

/// Build the application router over a fresh, empty store.
#[must_use]
pub fn app() -> Router {
    api::router(Arc::new(RwLock::new(TaskStore::new())))
}

/// Serve [`app`] on the given listener until the process exits.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}
