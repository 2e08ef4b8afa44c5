use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;
use crate::service::reconcile::BatchOutcome;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Batch failed: {failed} of {total} rows did not apply")]
    BatchFailed {
        failed: usize,
        total: usize,
        rows: Vec<String>,
    },
}

impl ApiError {
    /// Builds the batch-level failure from a settled outcome. Succeeded rows
    /// stay persisted; the response just has to say which rows did not.
    pub fn from_batch(outcome: &BatchOutcome) -> Self {
        ApiError::BatchFailed {
            failed: outcome.failures.len(),
            total: outcome.applied + outcome.failures.len(),
            rows: outcome.failures.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => ApiError::Database(e),
            StoreError::Unavailable(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string() }),
            ),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "error": self.to_string() })),
            ApiError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Database error occurred" }),
            ),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
            ApiError::BatchFailed { rows, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string(), "failed_rows": rows }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
