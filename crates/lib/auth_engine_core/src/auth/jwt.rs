//! JWT token generation and verification.

use std::path::PathBuf;

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::{debug, info};
use uuid::Uuid;

use super::AuthError;
use crate::models::auth::{TokenClaims, TokenLifetimes, TokenPair, TokenType};

/// Generate a signed JWT (HS256) of the given type for an account.
pub fn generate_token(
    user_id: i64,
    token_type: TokenType,
    ttl_secs: i64,
    secret: &[u8],
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        token_type,
        user_id,
        jti: Uuid::new_v4().simple().to_string(),
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Issue a fresh access + refresh token pair.
pub fn generate_token_pair(
    user_id: i64,
    lifetimes: &TokenLifetimes,
    secret: &[u8],
) -> Result<TokenPair, AuthError> {
    Ok(TokenPair {
        access: generate_token(user_id, TokenType::Access, lifetimes.access_secs, secret)?,
        refresh: generate_token(user_id, TokenType::Refresh, lifetimes.refresh_secs, secret)?,
    })
}

/// Verify a JWT, returning the claims only if the signature and expiry are
/// valid and the token is of the expected type.
pub fn verify_token(token: &str, expected: TokenType, secret: &[u8]) -> Option<TokenClaims> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    let claims = match decode::<TokenClaims>(token, &key, &validation) {
        Ok(data) => data.claims,
        Err(e) => {
            debug!(error = %e, "token rejected");
            return None;
        }
    };
    if claims.token_type != expected {
        debug!(got = %claims.token_type, %expected, "token type mismatch");
        return None;
    }
    Some(claims)
}

/// Resolve the JWT secret: env var `JWT_SECRET` → `AUTH_SECRET` → persisted file.
pub fn resolve_jwt_secret() -> String {
    if let Ok(secret) = std::env::var("JWT_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    if let Ok(secret) = std::env::var("AUTH_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    let secret_path = jwt_secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret = generate_secret();
    if let Some(parent) = secret_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(&secret_path, &secret);
    info!(path = %secret_path.display(), "generated new JWT secret");
    secret
}

/// 64 random alphanumeric characters.
fn generate_secret() -> String {
    rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("auth-engine")
        .join("jwt-secret")
}
