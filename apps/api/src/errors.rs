use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as a plain-text body carrying its message.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad upload, unsupported type, unreadable document.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    MissingConfig(String),

    /// Local failures: temp file I/O, upstream request construction, body reads.
    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    Upstream(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MissingConfig(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Build(_) => AppError::Internal("Failed to create upstream request".into()),
            LlmError::Transport(e) => AppError::Upstream(format!("Upstream error: {e}")),
            LlmError::Status { status, body } => {
                AppError::Upstream(format!("Upstream {status}: {body}"))
            }
            LlmError::Body(_) => AppError::Internal("Failed to read upstream response".into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{message}");
        } else {
            tracing::warn!(status = status.as_u16(), "{message}");
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}
