//! Transport-level errors for the task API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the task does not exist" from "the server returned an unexpected status."
//! Both failure variants keep the server's `{"error": ...}` message when the
//! body carried one, so the UI can surface it verbatim.

use std::fmt;

/// Errors returned by `TaskApiClient` parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404 — the referenced task does not exist.
    NotFound { message: Option<String> },

    /// The server returned a non-success status other than 404.
    Server {
        status: u16,
        message: Option<String>,
    },

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl ApiError {
    /// The server's error message, when the response body carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { message } | ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { message } => match message {
                Some(msg) => write!(f, "not found: {msg}"),
                None => write!(f, "not found"),
            },
            ApiError::Server { status, message } => match message {
                Some(msg) => write!(f, "HTTP {status}: {msg}"),
                None => write!(f, "HTTP {status}"),
            },
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
