//! Subcommand implementations over an `AccountStore`.

use auth_engine_core::accounts::{self, AccountKind};
use auth_engine_core::auth::password::BCRYPT_COST;
use auth_engine_core::models::account::{Account, AccountFlags};
use auth_engine_core::store::AccountStore;
use auth_engine_core::validation::{Registration, RegistrationInput, normalize_email};

use crate::{Error, Result};

/// Create a staff + superuser account.
pub async fn create_superuser(
    store: &dyn AccountStore,
    email: &str,
    name: &str,
    password: &str,
) -> Result<Account> {
    let registration = Registration::parse(RegistrationInput {
        name: Some(name),
        email: Some(email),
        password: Some(password),
        password2: Some(password),
    })
    .map_err(auth_engine_core::auth::AuthError::from)?;

    let account =
        accounts::create_account(store, registration, AccountKind::Superuser, BCRYPT_COST).await?;
    log::info!("created superuser {} (id {})", account.email, account.id);
    Ok(account)
}

/// Apply flag changes to the account with the given email.
pub async fn set_flags(
    store: &dyn AccountStore,
    email: &str,
    flags: AccountFlags,
) -> Result<Account> {
    if flags.is_empty() {
        return Err(Error::Custom(
            "nothing to change: pass --active, --staff or --superuser".into(),
        ));
    }
    let email = normalize_email(email);
    let account = store
        .find_by_email(&email)
        .await?
        .ok_or_else(|| Error::Custom(format!("no account with email {email}")))?;

    let updated = store.update_flags(account.id, &flags).await?;
    log::info!(
        "{}: active={} staff={} superuser={}",
        updated.email,
        updated.is_active,
        updated.is_staff,
        updated.is_superuser
    );
    Ok(updated)
}
