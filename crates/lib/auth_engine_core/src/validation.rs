//! Input validation with field-level error reporting.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::auth::policy::{self, UserAttributes};

/// Maximum length of an account name.
pub const NAME_MAX_LEN: usize = 100;

/// Maximum length of an account email.
pub const EMAIL_MAX_LEN: usize = 100;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_INVALID_EMAIL: &str = "Enter a valid email address.";
pub const MSG_DUPLICATE_EMAIL: &str = "user with this email already exists.";
pub const MSG_PASSWORD_MISMATCH: &str = "Password fields didn't match.";

/// Validation messages keyed by field name.
///
/// Serializes as `{"field": ["message", ...]}`; fields are ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error set holding a single message.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when no errors were recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(" "))?;
        }
        Ok(())
    }
}

/// Normalize an email address: trim surrounding whitespace and lowercase the
/// domain part. The local part is case-sensitive and kept as given.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Structural email check: a non-empty local part, a single `@`, and a
/// dotted domain of alphanumeric/hyphen labels.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

fn max_len_message(max: usize) -> String {
    format!("Ensure this field has no more than {max} characters.")
}

/// Require a field to be present.
pub fn required<'a>(errors: &mut FieldErrors, field: &str, value: Option<&'a str>) -> Option<&'a str> {
    if value.is_none() {
        errors.add(field, MSG_REQUIRED);
    }
    value
}

/// Record a blank error when `value` is empty after trimming. Returns true
/// when the value is usable.
pub fn check_not_blank(errors: &mut FieldErrors, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(field, MSG_BLANK);
        return false;
    }
    true
}

/// Require a field to be present and not blank.
pub fn required_not_blank<'a>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&'a str>,
) -> Option<&'a str> {
    required(errors, field, value).filter(|v| check_not_blank(errors, field, v))
}

/// Validate an account name, returning the trimmed value.
pub fn check_name(errors: &mut FieldErrors, field: &str, name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        errors.add(field, MSG_BLANK);
        return None;
    }
    if name.chars().count() > NAME_MAX_LEN {
        errors.add(field, max_len_message(NAME_MAX_LEN));
        return None;
    }
    Some(name.to_string())
}

/// Validate an email address, returning the normalized value.
pub fn check_email(errors: &mut FieldErrors, field: &str, email: &str) -> Option<String> {
    let email = normalize_email(email);
    if email.is_empty() {
        errors.add(field, MSG_BLANK);
        return None;
    }
    if email.chars().count() > EMAIL_MAX_LEN {
        errors.add(field, max_len_message(EMAIL_MAX_LEN));
        return None;
    }
    if !is_valid_email(&email) {
        errors.add(field, MSG_INVALID_EMAIL);
        return None;
    }
    Some(email)
}

/// Raw registration fields as received from a client.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationInput<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
    pub password2: Option<&'a str>,
}

/// A registration that passed every field check.
///
/// Email uniqueness is not checked here; that needs the store.
#[derive(Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl Registration {
    /// Validate raw input, collecting every field error.
    pub fn parse(input: RegistrationInput<'_>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = required(&mut errors, "name", input.name)
            .and_then(|n| check_name(&mut errors, "name", n));
        let email = required(&mut errors, "email", input.email)
            .and_then(|e| check_email(&mut errors, "email", e));
        let password = required(&mut errors, "password", input.password);
        let password2 = required(&mut errors, "password2", input.password2);

        if let Some(pw) = password {
            if check_not_blank(&mut errors, "password", pw) {
                let attributes = UserAttributes {
                    email: email.as_deref(),
                    name: name.as_deref(),
                };
                for message in policy::validate_password(pw, &attributes) {
                    errors.add("password", message);
                }
            }
            if let Some(pw2) = password2
                && pw != pw2
            {
                errors.add("password", MSG_PASSWORD_MISMATCH);
            }
        }

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) if errors.is_empty() => Ok(Self {
                name,
                email,
                password: password.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(password: &'a str, password2: &'a str) -> RegistrationInput<'a> {
        RegistrationInput {
            name: Some("Test User"),
            email: Some("test@example.com"),
            password: Some(password),
            password2: Some(password2),
        }
    }

    #[test]
    fn valid_registration_parses() {
        let reg = Registration::parse(input("TestPassword123!", "TestPassword123!")).unwrap();
        assert_eq!(reg.name, "Test User");
        assert_eq!(reg.email, "test@example.com");
        assert_eq!(reg.password, "TestPassword123!");
    }

    #[test]
    fn mismatched_passwords_are_rejected_on_password_field() {
        let errors =
            Registration::parse(input("TestPassword123!", "DifferentPassword123!")).unwrap_err();
        assert_eq!(
            errors.get("password"),
            Some(&[MSG_PASSWORD_MISMATCH.to_string()][..])
        );
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let errors = Registration::parse(RegistrationInput::default()).unwrap_err();
        for field in ["name", "email", "password", "password2"] {
            assert_eq!(errors.get(field), Some(&[MSG_REQUIRED.to_string()][..]));
        }
    }

    #[test]
    fn weak_password_and_bad_email_reported_together() {
        let errors = Registration::parse(RegistrationInput {
            name: Some("Test User"),
            email: Some("not-an-email"),
            password: Some("1234"),
            password2: Some("1234"),
        })
        .unwrap_err();
        assert_eq!(errors.get("email"), Some(&[MSG_INVALID_EMAIL.to_string()][..]));
        let pw = errors.get("password").unwrap();
        assert!(pw.iter().any(|m| m.contains("too short")));
        assert!(pw.iter().any(|m| m.contains("entirely numeric")));
    }

    #[test]
    fn required_not_blank_distinguishes_missing_from_blank() {
        let mut errors = FieldErrors::new();
        assert_eq!(required_not_blank(&mut errors, "email", None), None);
        assert_eq!(required_not_blank(&mut errors, "password", Some("   ")), None);
        assert_eq!(required_not_blank(&mut errors, "refresh", Some("abc")), Some("abc"));
        assert_eq!(errors.get("email"), Some(&[MSG_REQUIRED.to_string()][..]));
        assert_eq!(errors.get("password"), Some(&[MSG_BLANK.to_string()][..]));
        assert_eq!(errors.get("refresh"), None);
    }

    #[test]
    fn blank_and_overlong_names_are_rejected() {
        let mut errors = FieldErrors::new();
        assert!(check_name(&mut errors, "name", "   ").is_none());
        assert!(check_name(&mut errors, "name", &"x".repeat(NAME_MAX_LEN + 1)).is_none());
        assert_eq!(errors.get("name").unwrap().len(), 2);
        assert_eq!(
            check_name(&mut FieldErrors::new(), "name", "  Ada  ").as_deref(),
            Some("Ada")
        );
    }

    #[test]
    fn email_domain_is_lowercased() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "Alice@example.com");
        assert_eq!(normalize_email("no-at-sign"), "no-at-sign");
    }

    #[test]
    fn email_structure_checks() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("a.b+tag@sub.example-host.org"));
        assert!(!is_valid_email("test@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("test@example"));
        assert!(!is_valid_email("te st@example.com"));
        assert!(!is_valid_email("test@-example.com"));
        assert!(!is_valid_email("test@example..com"));
    }

    #[test]
    fn field_errors_serialize_as_map_of_lists() {
        let mut errors = FieldErrors::single("password", "a");
        errors.add("password", "b");
        errors.add("email", "c");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"email": ["c"], "password": ["a", "b"]})
        );
        assert_eq!(errors.to_string(), "email: c; password: a b");
    }
}
