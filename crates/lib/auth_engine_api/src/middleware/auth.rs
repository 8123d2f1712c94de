//! Authentication middleware: Bearer token extraction and JWT verification.

use auth_engine_core::auth::jwt::verify_token;
use auth_engine_core::models::auth::{TokenClaims, TokenType};
use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppState;
use crate::error::AppError;

/// Verified access token claims, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenClaims);

impl AuthenticatedUser {
    /// Account ID the caller authenticated as.
    pub fn user_id(&self) -> i64 {
        self.0.user_id
    }
}

/// Axum middleware: extracts `Authorization: Bearer <token>`, verifies it is a
/// live access token, and injects `AuthenticatedUser` into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Unauthorized("Authentication credentials were not provided.".into())
        })?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization scheme".into()))?;

    let claims = verify_token(token, TokenType::Access, state.config.jwt_secret.as_bytes())
        .ok_or_else(|| {
            AppError::Unauthorized("Given token not valid for any token type".into())
        })?;

    request.extensions_mut().insert(AuthenticatedUser(claims));

    Ok(next.run(request).await)
}
