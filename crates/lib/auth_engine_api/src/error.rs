//! Application error types.

use auth_engine_core::auth::AuthError;
use auth_engine_core::store::StoreError;
use auth_engine_core::validation::FieldErrors;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Field key for errors about the request body as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Message for failed logins; identical for unknown email, wrong password and
/// inactive account.
pub const MSG_BAD_CREDENTIALS: &str = "No active account found with the given credentials";

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "validation_error".into(),
                    message: fields.to_string(),
                    fields: Some(fields),
                },
            ),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, ErrorResponse::new("not_found", m)),
            AppError::Unauthorized(m) => {
                (StatusCode::UNAUTHORIZED, ErrorResponse::new("unauthorized", m))
            }
            AppError::Internal(detail) => {
                error!(%detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("internal_error", "Internal server error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<FieldErrors> for AppError {
    fn from(fields: FieldErrors) -> Self {
        AppError::Validation(fields)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(status = %rejection.status(), "rejected request body");
        AppError::Validation(FieldErrors::single(NON_FIELD_ERRORS, rejection.body_text()))
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => AppError::NotFound(format!("account {id}")),
            StoreError::DuplicateEmail(_) => AppError::Validation(FieldErrors::single(
                "email",
                auth_engine_core::validation::MSG_DUPLICATE_EMAIL,
            )),
            StoreError::Db(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::CredentialError => AppError::Unauthorized(MSG_BAD_CREDENTIALS.into()),
            AuthError::TokenError(msg) => AppError::Unauthorized(msg),
            AuthError::ValidationError(fields) => AppError::Validation(fields),
            AuthError::Store(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}
