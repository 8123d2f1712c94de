//! Request and response bodies.
//!
//! Request fields are `Option` so that a missing field becomes a field-level
//! validation error instead of a body rejection. Unknown fields are ignored.

use auth_engine_core::models::account::Account;
use auth_engine_core::validation::FieldErrors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `POST /api/register` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
}

/// `POST /api/token` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// `POST /api/token/refresh` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

/// `PATCH`/`PUT /api/profile` body. Only `name` is writable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
}

/// Public account representation. Never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub date_joined: DateTime<Utc>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            date_joined: account.date_joined,
        }
    }
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self::from(&account)
    }
}

/// Login response: a fresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

/// Refresh response: a new access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

/// `GET /api/health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub version: String,
    #[serde(rename = "storeConnected")]
    pub store_connected: bool,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error kind (e.g. `validation_error`).
    pub error: String,
    /// Human-readable summary.
    pub message: String,
    /// Per-field messages, present for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            fields: None,
        }
    }
}
