//! Password hashing via bcrypt.
//!
//! bcrypt only reads the first 72 bytes of its input, so passwords are
//! SHA-256 digested (hex, 64 bytes) first. Every byte of the password then
//! affects the stored hash.

use sha2::{Digest, Sha256};

use super::AuthError;

/// bcrypt cost factor.
pub const BCRYPT_COST: u32 = 10;

/// Hex SHA-256 of the password, fed to bcrypt in place of the raw bytes.
fn prehash(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Hash a password with an explicit bcrypt cost.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(prehash(password), cost)
        .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a hash produced by [`hash_password_with_cost`].
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(prehash(password), hash)
        .map_err(|e| AuthError::Internal(format!("bcrypt verify: {e}")))
}

/// Hash on the blocking pool so bcrypt does not stall the async runtime.
pub async fn hash_password_blocking(password: String, cost: u32) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password_with_cost(&password, cost))
        .await
        .map_err(|e| AuthError::Internal(format!("hash task: {e}")))?
}

/// Verify on the blocking pool.
pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AuthError::Internal(format!("verify task: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_plaintext_and_verifies() {
        let hash = hash_password_with_cost("TestPassword123!", 4).unwrap();
        assert_ne!(hash, "TestPassword123!");
        assert!(hash.starts_with("$2"));
        assert!(verify_password("TestPassword123!", &hash).unwrap());
        assert!(!verify_password("WrongPassword123!", &hash).unwrap());
    }

    #[test]
    fn bytes_past_72_still_count() {
        let stored = format!("{}A", "TestPassword123!".repeat(5));
        let other = format!("{}B", "TestPassword123!".repeat(5));
        assert!(stored.len() > 72);

        let hash = hash_password_with_cost(&stored, 4).unwrap();
        assert!(verify_password(&stored, &hash).unwrap());
        assert!(!verify_password(&other, &hash).unwrap());
    }

    #[test]
    fn prehash_is_hex_sha256() {
        let digest = prehash("abc");
        assert_eq!(digest.len(), 64);
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }

    #[tokio::test]
    async fn blocking_wrappers_round_trip() {
        let hash = hash_password_blocking("TestPassword123!".into(), 4)
            .await
            .unwrap();
        assert!(
            verify_password_blocking("TestPassword123!".into(), hash)
                .await
                .unwrap()
        );
    }
}
