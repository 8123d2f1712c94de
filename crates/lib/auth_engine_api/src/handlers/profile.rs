//! Profile handlers. The account is always the one named by the access token.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{AccountResponse, UpdateProfileRequest};
use crate::services::profile::{self, UpdateMode};

/// `GET /api/profile`
pub async fn get_profile_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<AccountResponse>> {
    let resp = profile::get_profile(state.store.as_ref(), &user).await?;
    Ok(Json(resp))
}

/// `PATCH /api/profile`: partial update.
pub async fn patch_profile_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> AppResult<Json<AccountResponse>> {
    let Json(body) = body?;
    let resp =
        profile::update_profile(state.store.as_ref(), &user, &body, UpdateMode::Partial).await?;
    Ok(Json(resp))
}

/// `PUT /api/profile`: full update; every writable field is required.
pub async fn put_profile_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> AppResult<Json<AccountResponse>> {
    let Json(body) = body?;
    let resp =
        profile::update_profile(state.store.as_ref(), &user, &body, UpdateMode::Full).await?;
    Ok(Json(resp))
}
