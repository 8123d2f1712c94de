//! Authentication service: register/login/refresh flows delegating to
//! `auth_engine_core`.

use auth_engine_core::accounts::{self, AccountKind};
use auth_engine_core::auth::jwt::{generate_token, generate_token_pair, verify_token};
use auth_engine_core::models::auth::{TokenLifetimes, TokenType};
use auth_engine_core::store::AccountStore;
use auth_engine_core::validation::{
    FieldErrors, Registration, RegistrationInput, required_not_blank,
};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{
    AccessTokenResponse, AccountResponse, LoginRequest, RefreshRequest, RegisterRequest,
    TokenPairResponse,
};

/// Message for any refresh token that fails verification.
pub const MSG_INVALID_REFRESH: &str = "Token is invalid or expired";

/// Register a new account.
pub async fn register(
    store: &dyn AccountStore,
    request: &RegisterRequest,
    bcrypt_cost: u32,
) -> AppResult<AccountResponse> {
    let registration = Registration::parse(RegistrationInput {
        name: request.name.as_deref(),
        email: request.email.as_deref(),
        password: request.password.as_deref(),
        password2: request.password2.as_deref(),
    })?;

    let account =
        accounts::create_account(store, registration, AccountKind::Regular, bcrypt_cost).await?;
    Ok(AccountResponse::from(account))
}

/// Authenticate with email + password, returning a fresh token pair.
pub async fn login(
    store: &dyn AccountStore,
    request: &LoginRequest,
    lifetimes: &TokenLifetimes,
    jwt_secret: &[u8],
    bcrypt_cost: u32,
) -> AppResult<TokenPairResponse> {
    let mut errors = FieldErrors::new();
    let email = required_not_blank(&mut errors, "email", request.email.as_deref());
    let password = required_not_blank(&mut errors, "password", request.password.as_deref());
    let (Some(email), Some(password)) = (email, password) else {
        return Err(AppError::Validation(errors));
    };

    let account = accounts::authenticate(store, email, password, bcrypt_cost).await?;
    let pair = generate_token_pair(account.id, lifetimes, jwt_secret)?;
    info!(user_id = account.id, "issued token pair");

    Ok(TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
    })
}

/// Exchange a refresh token for a new access token.
///
/// The refresh token itself is not rotated. The account must still exist and
/// be active.
pub async fn refresh(
    store: &dyn AccountStore,
    request: &RefreshRequest,
    lifetimes: &TokenLifetimes,
    jwt_secret: &[u8],
) -> AppResult<AccessTokenResponse> {
    let mut errors = FieldErrors::new();
    let Some(token) = required_not_blank(&mut errors, "refresh", request.refresh.as_deref()) else {
        return Err(AppError::Validation(errors));
    };

    let claims = verify_token(token, TokenType::Refresh, jwt_secret)
        .ok_or_else(|| AppError::Unauthorized(MSG_INVALID_REFRESH.into()))?;

    match store.find_by_id(claims.user_id).await? {
        Some(account) if account.is_active => {}
        _ => {
            debug!(user_id = claims.user_id, "refresh for missing or inactive account");
            return Err(AppError::Unauthorized(MSG_INVALID_REFRESH.into()));
        }
    }

    let access = generate_token(
        claims.user_id,
        TokenType::Access,
        lifetimes.access_secs,
        jwt_secret,
    )?;
    debug!(user_id = claims.user_id, "refreshed access token");
    Ok(AccessTokenResponse { access })
}
