//! Password strength policy.
//!
//! Every rule runs; the caller gets one message per failed rule.

/// Minimum password length in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Similarity ratio at or above which a password is too close to a user
/// attribute.
pub const MAX_SIMILARITY: f64 = 0.7;

/// Lowercased passwords rejected outright.
const COMMON_PASSWORDS: &[&str] = &[
    "123456", "123456789", "12345678", "1234567890", "password", "password1",
    "password123", "passw0rd", "qwerty", "qwerty123", "qwertyuiop", "abc123",
    "abcd1234", "111111", "000000", "123123", "iloveyou", "admin", "admin123",
    "administrator", "welcome", "welcome1", "letmein", "monkey", "dragon",
    "football", "baseball", "sunshine", "princess", "master", "shadow",
    "superman", "trustno1", "whatever", "starwars", "changeme", "default",
    "secret", "1q2w3e4r", "1qaz2wsx", "zaq12wsx", "asdfghjkl", "zxcvbnm",
    "michael", "jennifer", "computer", "internet", "login", "hello123",
    "freedom", "mustang", "access", "p@ssw0rd", "p@ssword",
];

/// User attributes a password must not resemble.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAttributes<'a> {
    pub email: Option<&'a str>,
    pub name: Option<&'a str>,
}

/// Check a password against every policy rule, returning the failures.
pub fn validate_password(password: &str, attributes: &UserAttributes<'_>) -> Vec<String> {
    let mut failures = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LEN {
        failures.push(format!(
            "This password is too short. It must contain at least {MIN_PASSWORD_LEN} characters."
        ));
    }

    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.trim()) {
        failures.push("This password is too common.".to_string());
    }

    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        failures.push("This password is entirely numeric.".to_string());
    }

    for (label, value) in [("email", attributes.email), ("name", attributes.name)] {
        let Some(value) = value else { continue };
        if is_too_similar(&lowered, &value.to_lowercase()) {
            failures.push(format!("The password is too similar to the {label}."));
        }
    }

    failures
}

/// True when the password is too close to the whole value or any of its
/// word parts (split on non-alphanumeric characters).
fn is_too_similar(password: &str, value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    let password_len = password.chars().count();
    std::iter::once(value)
        .chain(value.split(|c: char| !c.is_alphanumeric()))
        .filter(|part| !part.is_empty())
        .filter(|part| !cannot_reach_similarity(password_len, part.chars().count()))
        .any(|part| similarity(password, part) >= MAX_SIMILARITY)
}

/// True when the length gap alone keeps the ratio below `MAX_SIMILARITY`.
///
/// `M <= value_len`, so the ratio is at most
/// `2 * value_len / (password_len + value_len)`. Skipping these pairs keeps
/// the quadratic comparison away from very long passwords.
fn cannot_reach_similarity(password_len: usize, value_len: usize) -> bool {
    let best = 2.0 * value_len as f64 / (password_len + value_len) as f64;
    best < MAX_SIMILARITY
}

/// `2 * M / T` where `M` is the longest common subsequence length and `T` the
/// combined length. 1.0 for identical strings, 0.0 for disjoint ones.
fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in &a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    2.0 * prev[b.len()] as f64 / total as f64
}
