use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::domain::DomainError;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400, reported as `{ error }`.
    #[error("{0}")]
    BadRequest(String),

    /// 500, reported as `{ success: false, error, details? }`.
    #[error("{message}")]
    Internal {
        message: String,
        details: Option<String>,
    },
}

impl ApiError {
    /// Map a domain error; details of internal failures are kept only in development mode.
    pub fn from_domain(error: DomainError, dev_mode: bool) -> Self {
        match error {
            DomainError::InvalidInput(message) => Self::BadRequest(message),
            other => Self::internal(other.to_string(), dev_mode),
        }
    }

    pub fn internal(details: impl Into<String>, dev_mode: bool) -> Self {
        Self::Internal {
            message: INTERNAL_ERROR_MESSAGE.to_string(),
            details: dev_mode.then(|| details.into()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::BadRequest(message) => json!({ "error": message }),
            Self::Internal {
                message,
                details: Some(details),
            } => json!({ "success": false, "error": message, "details": details }),
            Self::Internal {
                message,
                details: None,
            } => json!({ "success": false, "error": message }),
        };
        (status, Json(body)).into_response()
    }
}

/// Response for a panicking handler; never exposes the panic payload.
pub fn panic_response(_panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    ApiError::internal("handler panicked", false).into_response()
}
