//! Account domain models.

use std::fmt;

use chrono::{DateTime, Utc};

/// A persisted account.
///
/// Not `Serialize`: the password hash must never reach a response
/// body. API layers convert into their own public representation.
#[derive(Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("date_joined", &self.date_joined)
            .field("is_active", &self.is_active)
            .field("is_staff", &self.is_staff)
            .field("is_superuser", &self.is_superuser)
            .finish()
    }
}

/// Values required to insert a new account. `id` and `date_joined` are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// Administrative flag changes. `None` leaves the flag untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountFlags {
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

impl AccountFlags {
    /// True when no flag would change.
    pub fn is_empty(&self) -> bool {
        self.is_active.is_none() && self.is_staff.is_none() && self.is_superuser.is_none()
    }

    /// Apply the requested changes to an account in place.
    pub fn apply(&self, account: &mut Account) {
        if let Some(v) = self.is_active {
            account.is_active = v;
        }
        if let Some(v) = self.is_staff {
            account.is_staff = v;
        }
        if let Some(v) = self.is_superuser {
            account.is_superuser = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Account {
        Account {
            id: 1,
            name: "Test User".into(),
            email: "test@example.com".into(),
            password_hash: "$2b$10$secret".into(),
            date_joined: Utc::now(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }

    #[test]
    fn debug_output_redacts_password_hash() {
        let out = format!("{:?}", sample());
        assert!(!out.contains("$2b$10$secret"));
        assert!(out.contains("<redacted>"));
    }

    #[test]
    fn flags_apply_only_requested_changes() {
        let mut account = sample();
        let flags = AccountFlags {
            is_active: Some(false),
            is_staff: None,
            is_superuser: Some(true),
        };
        flags.apply(&mut account);
        assert!(!account.is_active);
        assert!(!account.is_staff);
        assert!(account.is_superuser);
    }

    #[test]
    fn default_flags_are_empty() {
        assert!(AccountFlags::default().is_empty());
    }
}
