//! Profile service: the caller's own account, identified by token claims.

use auth_engine_core::models::account::Account;
use auth_engine_core::store::AccountStore;
use auth_engine_core::validation::{FieldErrors, MSG_REQUIRED, check_name};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{AccountResponse, UpdateProfileRequest};

/// Whether an update must carry every writable field (`PUT`) or may carry a
/// subset (`PATCH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Partial,
    Full,
}

/// Load the authenticated caller's account. A token for an account that no
/// longer exists or was deactivated is treated as invalid.
async fn current_account(store: &dyn AccountStore, user: &AuthenticatedUser) -> AppResult<Account> {
    match store.find_by_id(user.user_id()).await? {
        Some(account) if account.is_active => Ok(account),
        Some(_) => Err(AppError::Unauthorized("User is inactive".into())),
        None => Err(AppError::Unauthorized("User not found".into())),
    }
}

/// Fetch the caller's profile.
pub async fn get_profile(
    store: &dyn AccountStore,
    user: &AuthenticatedUser,
) -> AppResult<AccountResponse> {
    let account = current_account(store, user).await?;
    Ok(AccountResponse::from(account))
}

/// Update the caller's profile.
pub async fn update_profile(
    store: &dyn AccountStore,
    user: &AuthenticatedUser,
    request: &UpdateProfileRequest,
    mode: UpdateMode,
) -> AppResult<AccountResponse> {
    let account = current_account(store, user).await?;

    let mut errors = FieldErrors::new();
    let name = match request.name.as_deref() {
        Some(name) => check_name(&mut errors, "name", name),
        None if mode == UpdateMode::Full => {
            errors.add("name", MSG_REQUIRED);
            None
        }
        None => None,
    };
    errors.into_result()?;

    let account = match name {
        Some(name) if name != account.name => {
            let updated = store.update_name(account.id, &name).await?;
            info!(user_id = updated.id, "profile name updated");
            updated
        }
        _ => account,
    };
    Ok(AccountResponse::from(account))
}
