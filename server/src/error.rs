//! Boundary error rendering for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::store::StoreError;

/// Wraps a [`StoreError`] at the API boundary and renders it as
/// `{"error": <message>}` with the store's status hint, defaulting to 500
/// when no hint is present.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] StoreError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self
            .0
            .status_hint()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        tracing::warn!(status = %status, error = %self.0, "request failed");
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
