//! Client-side DTOs mirroring the server's wire schema.
//!
//! Defined independently from the server crate (the live integration test
//! catches schema drift), so this crate stays free of axum internals.

use serde::{Deserialize, Serialize};

/// A single task as the server reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub done: bool,
    /// Epoch milliseconds. Zero on optimistic placeholders until the server
    /// confirms.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// Request payload for creating a task. Fields are sent raw; the server
/// owns trimming.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
}

/// Partial update. Only the fields present in the JSON are applied; omitted
/// fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

/// Status filter for the list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        }
    }
}

/// Shareable navigational state: status filter plus search text. Rendering
/// it as a query string makes a filtered view bookmarkable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub status: StatusFilter,
    pub q: String,
}

impl ListView {
    /// Percent-encoded query string without the leading `?`. Default values
    /// are omitted, so the default view renders as the empty string.
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut pairs = form_urlencoded::Serializer::new(String::new());
        if self.status != StatusFilter::All {
            pairs.append_pair("status", self.status.as_str());
        }
        if !self.q.is_empty() {
            pairs.append_pair("q", &self.q);
        }
        pairs.finish()
    }
}
