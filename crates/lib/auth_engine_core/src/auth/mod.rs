//! Authentication and credential handling.
//!
//! Provides password hashing and policy checks, and JWT issue/verification,
//! shared by `auth_engine_api` and `auth_engine_cli`.

pub mod jwt;
pub mod password;
pub mod policy;

use thiserror::Error;

use crate::store::StoreError;
use crate::validation::FieldErrors;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    CredentialError,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Validation error: {0}")]
    ValidationError(FieldErrors),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<FieldErrors> for AuthError {
    fn from(errors: FieldErrors) -> Self {
        AuthError::ValidationError(errors)
    }
}
