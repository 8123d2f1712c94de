//! Registration, login and token refresh handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{
    AccessTokenResponse, AccountResponse, LoginRequest, RefreshRequest, RegisterRequest,
    TokenPairResponse,
};
use crate::services::auth;

/// `POST /api/register`: create a new account.
pub async fn register_handler(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let Json(body) = body?;
    let resp = auth::register(state.store.as_ref(), &body, state.config.bcrypt_cost).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// `POST /api/token`: authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<TokenPairResponse>> {
    let Json(body) = body?;
    let resp = auth::login(
        state.store.as_ref(),
        &body,
        &state.config.token_lifetimes,
        state.config.jwt_secret.as_bytes(),
        state.config.bcrypt_cost,
    )
    .await?;
    Ok(Json(resp))
}

/// `POST /api/token/refresh`: exchange a refresh token for a new access token.
pub async fn refresh_handler(
    State(state): State<AppState>,
    body: Result<Json<RefreshRequest>, JsonRejection>,
) -> AppResult<Json<AccessTokenResponse>> {
    let Json(body) = body?;
    let resp = auth::refresh(
        state.store.as_ref(),
        &body,
        &state.config.token_lifetimes,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(Json(resp))
}
