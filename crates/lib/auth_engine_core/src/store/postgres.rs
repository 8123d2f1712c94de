//! PostgreSQL-backed account store.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{AccountStore, StoreError};
use crate::models::account::{Account, AccountFlags, NewAccount};

const ACCOUNT_COLUMNS: &str =
    "id, name, email, password_hash, date_joined, is_active, is_staff, is_superuser";

/// Account store over a `PgPool`.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        let sql = format!(
            "INSERT INTO accounts (name, email, password_hash, is_staff, is_superuser) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {ACCOUNT_COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&sql)
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.is_staff)
            .bind(account.is_superuser)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    StoreError::DuplicateEmail(account.email.clone())
                }
                other => StoreError::Db(other),
            })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1");
        let row = sqlx::query_as::<_, Account>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, StoreError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");
        let row = sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_name(&self, id: i64, name: &str) -> Result<Account, StoreError> {
        let sql = format!("UPDATE accounts SET name = $2 WHERE id = $1 RETURNING {ACCOUNT_COLUMNS}");
        sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn update_flags(&self, id: i64, flags: &AccountFlags) -> Result<Account, StoreError> {
        let sql = format!(
            "UPDATE accounts SET \
               is_active = COALESCE($2, is_active), \
               is_staff = COALESCE($3, is_staff), \
               is_superuser = COALESCE($4, is_superuser) \
             WHERE id = $1 RETURNING {ACCOUNT_COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .bind(flags.is_active)
            .bind(flags.is_staff)
            .bind(flags.is_superuser)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
