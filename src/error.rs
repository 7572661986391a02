//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;
use crate::store::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Server errors (5xx)
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Unreadable request bodies get the same error shape as rejected forms
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// HTTP status and stable error code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),

            AppError::Domain(domain_err) => match domain_err {
                DomainError::MissingField(_) => (StatusCode::BAD_REQUEST, "missing_field"),
                DomainError::InvalidNumber { .. } => (StatusCode::BAD_REQUEST, "invalid_number"),
                DomainError::InvalidDate { .. } => (StatusCode::BAD_REQUEST, "invalid_date"),
                DomainError::InvalidAmount(_) => (StatusCode::BAD_REQUEST, "invalid_amount"),
                DomainError::InvalidTransactionType(_) => {
                    (StatusCode::BAD_REQUEST, "invalid_transaction_type")
                }
                DomainError::InvalidId { .. } => (StatusCode::BAD_REQUEST, "invalid_id"),
            },

            AppError::Store(StoreError::MemberNotFound(_)) => {
                (StatusCode::NOT_FOUND, "member_not_found")
            }
            AppError::Store(StoreError::CorruptRow { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "corrupt_row")
            }
            AppError::Store(StoreError::Database(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let details = match &self {
            AppError::InvalidRequest(msg) => Some(msg.clone()),
            AppError::Domain(domain_err) => domain_err.field().map(str::to_string),
            AppError::Store(StoreError::MemberNotFound(id)) => Some(id.to_string()),
            _ => None,
        };

        // Server-side failures are logged in full but not echoed to the client
        let error = if status.is_server_error() {
            tracing::error!(error_code, "Request failed: {:?}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
