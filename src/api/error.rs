//! Transport errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::validation::{InvalidTask, ValidationError};

/// A request the API refuses to process.
///
/// Every variant maps to `400 Bad Request` with a JSON body carrying an
/// `error` message and, for validation failures, a `detail` list.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid task input")]
    InvalidTask(InvalidTask),
    #[error("invalid options")]
    InvalidOptions(Vec<ValidationError>),
    #[error("tasks must be valid JSON in query parameter \"tasks\".")]
    InvalidTasksQuery,
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

impl From<InvalidTask> for ApiError {
    fn from(err: InvalidTask) -> Self {
        ApiError::InvalidTask(err)
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// JSON body for this error.
    pub fn body(&self) -> serde_json::Value {
        match self {
            ApiError::InvalidTask(invalid) => json!({
                "error": self.to_string(),
                "detail": invalid.errors,
                "task": invalid.task,
            }),
            ApiError::InvalidOptions(errors) => json!({
                "error": self.to_string(),
                "detail": errors,
            }),
            ApiError::InvalidTasksQuery | ApiError::MalformedBody(_) => json!({
                "error": self.to_string(),
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "rejected request");
        (self.status(), Json(self.body())).into_response()
    }
}
