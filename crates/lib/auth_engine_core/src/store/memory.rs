//! In-process account store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{AccountStore, StoreError};
use crate::models::account::{Account, AccountFlags, NewAccount};

#[derive(Debug, Default)]
struct Inner {
    accounts: BTreeMap<i64, Account>,
    last_id: i64,
}

/// Account store held in memory. Contents are lost on drop.
///
/// Writes take the lock exclusively, so the email uniqueness check and the
/// insert are atomic.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    inner: RwLock<Inner>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.accounts.values().any(|a| a.email == account.email) {
            return Err(StoreError::DuplicateEmail(account.email));
        }
        inner.last_id += 1;
        let created = Account {
            id: inner.last_id,
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
            date_joined: Utc::now(),
            is_active: true,
            is_staff: account.is_staff,
            is_superuser: account.is_superuser,
        };
        inner.accounts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, StoreError> {
        Ok(self.inner.read().await.accounts.get(&id).cloned())
    }

    async fn update_name(&self, id: i64, name: &str) -> Result<Account, StoreError> {
        let mut inner = self.inner.write().await;
        let account = inner.accounts.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        account.name = name.to_string();
        Ok(account.clone())
    }

    async fn update_flags(&self, id: i64, flags: &AccountFlags) -> Result<Account, StoreError> {
        let mut inner = self.inner.write().await;
        let account = inner.accounts.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        flags.apply(account);
        Ok(account.clone())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.inner.read().await.accounts.len() as i64)
    }

    async fn ping(&self) -> bool {
        true
    }
}
