//! PostgreSQL account store test.
//!
//! Runs only when `TEST_DATABASE_URL` points at a disposable database; the
//! `accounts` table is truncated first.

use auth_engine_core::models::account::{AccountFlags, NewAccount};
use auth_engine_core::store::{AccountStore, PgAccountStore, StoreError};

async fn connect() -> Option<PgAccountStore> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = sqlx::PgPool::connect(&url)
        .await
        .expect("connect to TEST_DATABASE_URL");
    auth_engine_core::migrate::migrate(&pool)
        .await
        .expect("run migrations");
    sqlx::query("TRUNCATE accounts RESTART IDENTITY")
        .execute(&pool)
        .await
        .expect("truncate accounts");
    Some(PgAccountStore::new(pool))
}

fn new_account(email: &str) -> NewAccount {
    NewAccount {
        name: "Test User".into(),
        email: email.into(),
        password_hash: "$2b$04$placeholder".into(),
        is_staff: false,
        is_superuser: false,
    }
}

#[tokio::test]
async fn pg_store_enforces_unique_email_and_updates() {
    let Some(store) = connect().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    assert!(store.ping().await);

    let created = store.create(new_account("test@example.com")).await.unwrap();
    assert!(created.is_active);
    assert!(!created.is_staff);

    let dup = store.create(new_account("test@example.com")).await;
    assert!(matches!(dup, Err(StoreError::DuplicateEmail(_))));
    assert_eq!(store.count().await.unwrap(), 1);

    let renamed = store.update_name(created.id, "Updated User").await.unwrap();
    assert_eq!(renamed.name, "Updated User");
    assert_eq!(renamed.date_joined, created.date_joined);

    let flagged = store
        .update_flags(created.id, &AccountFlags {
            is_staff: Some(true),
            ..AccountFlags::default()
        })
        .await
        .unwrap();
    assert!(flagged.is_staff);
    assert!(flagged.is_active);

    let found = store.find_by_email("test@example.com").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert!(store.find_by_id(created.id + 1000).await.unwrap().is_none());
}
