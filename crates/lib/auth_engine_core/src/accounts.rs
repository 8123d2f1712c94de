//! Account workflows shared by the API and the admin CLI.

use tracing::{debug, info};

use crate::auth::AuthError;
use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::models::account::{Account, NewAccount};
use crate::store::{AccountStore, StoreError};
use crate::validation::{FieldErrors, MSG_DUPLICATE_EMAIL, Registration, normalize_email};

/// Privilege level granted at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Regular,
    Superuser,
}

/// Create an account from a validated registration.
///
/// Fails with a field-level `email` error when the address is taken, either
/// on the pre-check or when the store rejects a concurrent insert.
pub async fn create_account(
    store: &dyn AccountStore,
    registration: Registration,
    kind: AccountKind,
    bcrypt_cost: u32,
) -> Result<Account, AuthError> {
    if store.find_by_email(&registration.email).await?.is_some() {
        return Err(FieldErrors::single("email", MSG_DUPLICATE_EMAIL).into());
    }

    let password_hash = hash_password_blocking(registration.password, bcrypt_cost).await?;
    let superuser = kind == AccountKind::Superuser;

    let account = store
        .create(NewAccount {
            name: registration.name,
            email: registration.email,
            password_hash,
            is_staff: superuser,
            is_superuser: superuser,
        })
        .await
        .map_err(|e| match e {
            StoreError::DuplicateEmail(_) => {
                AuthError::from(FieldErrors::single("email", MSG_DUPLICATE_EMAIL))
            }
            other => AuthError::from(other),
        })?;

    info!(user_id = account.id, email = %account.email, ?kind, "account created");
    Ok(account)
}

/// Check an email/password pair, returning the active account it belongs to.
///
/// Unknown email, wrong password and inactive account all yield
/// `AuthError::CredentialError`. An unknown email still pays for one bcrypt
/// run at `bcrypt_cost`, so response time does not reveal registered
/// addresses.
pub async fn authenticate(
    store: &dyn AccountStore,
    email: &str,
    password: &str,
    bcrypt_cost: u32,
) -> Result<Account, AuthError> {
    let email = normalize_email(email);
    let Some(account) = store.find_by_email(&email).await? else {
        debug!(%email, "login for unknown email");
        hash_password_blocking(password.to_string(), bcrypt_cost).await?;
        return Err(AuthError::CredentialError);
    };

    if !verify_password_blocking(password.to_string(), account.password_hash.clone()).await? {
        debug!(user_id = account.id, "login with wrong password");
        return Err(AuthError::CredentialError);
    }

    if !account.is_active {
        debug!(user_id = account.id, "login for inactive account");
        return Err(AuthError::CredentialError);
    }

    Ok(account)
}
