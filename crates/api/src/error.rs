use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fleet_core::error::CoreError;
use fleet_core::validation::FieldErrors;
use fleet_db::store::StoreError;
use serde::Serialize;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`StoreError`] for record store
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce one consistent JSON error body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `fleet_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A record store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// The JSON body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // --- CoreError variants ---
            AppError::Core(CoreError::Validation(errors)) => {
                tracing::warn!(%errors, "Validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        message: "Validation failed".to_string(),
                        code: "VALIDATION_ERROR",
                        errors: Some(errors),
                    },
                )
            }
            AppError::Core(err @ CoreError::NotFound { .. }) => {
                tracing::warn!(error = %err, "Not found");
                error_body(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
            }
            AppError::Core(CoreError::Conflict(msg)) => {
                tracing::warn!(error = %msg, "Conflict");
                error_body(StatusCode::BAD_REQUEST, "CONFLICT", msg)
            }
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                internal_error()
            }

            // --- Store errors ---
            AppError::Store(err @ StoreError::UniqueViolation { .. }) => {
                tracing::warn!(error = %err, "Store rejected duplicate value");
                error_body(StatusCode::BAD_REQUEST, "CONFLICT", err.to_string())
            }
            AppError::Store(StoreError::Database(err)) => {
                tracing::error!(error = %err, "Database error");
                internal_error()
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                error_body(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

fn error_body(status: StatusCode, code: &'static str, message: String) -> (StatusCode, ErrorBody) {
    (
        status,
        ErrorBody {
            message,
            code,
            errors: None,
        },
    )
}

fn internal_error() -> (StatusCode, ErrorBody) {
    error_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}
