//! Error handling for the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bookstore_db::DbError;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Body of a server error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Vec<serde_json::Value>,
    pub trace_id: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    /// Rendered as a bare 404; the message only reaches the logs.
    #[error("not found: {message}")]
    NotFound { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound { message } => {
                tracing::debug!(%message, "resource not found");
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Internal(e) => {
                let error_id = Uuid::new_v4();
                let status = StatusCode::INTERNAL_SERVER_ERROR;

                tracing::error!(
                    error_id = %error_id,
                    status_code = %status.as_u16(),
                    error = %format!("{e:#}"),
                    "Request error"
                );

                // Storage details stay in the logs for release builds
                let message = if cfg!(debug_assertions) {
                    format!("{e:#}")
                } else {
                    "An internal server error occurred".to_string()
                };

                let body = ErrorEnvelope {
                    error: ErrorBody {
                        code: "internal_error".to_string(),
                        message,
                        details: Vec::new(),
                        trace_id: error_id.to_string(),
                        timestamp: OffsetDateTime::now_utc().to_string(),
                    },
                };

                (status, Json(body)).into_response()
            }
        }
    }
}
