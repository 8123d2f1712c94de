//! Account persistence.
//!
//! `AccountStore` is the narrow repository interface the services use.
//! `PgAccountStore` backs it with PostgreSQL; `MemoryAccountStore` keeps
//! accounts in process for development and tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::account::{Account, AccountFlags, NewAccount};

pub use memory::MemoryAccountStore;
pub use postgres::PgAccountStore;

/// Account store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Account not found: {0}")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Repository interface over persisted accounts.
///
/// Implementations enforce email uniqueness: `create` fails with
/// `StoreError::DuplicateEmail` rather than inserting a second row.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account, returning it with its assigned id and join date.
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Look up an account by its (normalized) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Look up an account by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, StoreError>;

    /// Set an account's name.
    async fn update_name(&self, id: i64, name: &str) -> Result<Account, StoreError>;

    /// Change administrative flags.
    async fn update_flags(&self, id: i64, flags: &AccountFlags) -> Result<Account, StoreError>;

    /// Total number of accounts.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Whether the backing store is reachable.
    async fn ping(&self) -> bool;
}
