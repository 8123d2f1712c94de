//! API server configuration.

use std::str::FromStr;

use auth_engine_core::auth::jwt::resolve_jwt_secret;
use auth_engine_core::auth::password::BCRYPT_COST;
use auth_engine_core::models::auth::{
    DEFAULT_ACCESS_TOKEN_TTL_SECS, DEFAULT_REFRESH_TOKEN_TTL_SECS, TokenLifetimes,
};

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8000").
    pub bind_addr: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Access/refresh token lifetimes.
    pub token_lifetimes: TokenLifetimes,
    /// bcrypt cost used when hashing new passwords.
    pub bcrypt_cost: u32,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                 | Default                                |
    /// |--------------------------|----------------------------------------|
    /// | `BIND_ADDR`              | `127.0.0.1:8000`                       |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted to file      |
    /// | `ACCESS_TOKEN_TTL_SECS`  | `300`                                  |
    /// | `REFRESH_TOKEN_TTL_SECS` | `86400`                                |
    /// | `BCRYPT_COST`            | `10`                                   |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".into()),
            jwt_secret: resolve_jwt_secret(),
            token_lifetimes: TokenLifetimes {
                access_secs: env_or("ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TOKEN_TTL_SECS),
                refresh_secs: env_or("REFRESH_TOKEN_TTL_SECS", DEFAULT_REFRESH_TOKEN_TTL_SECS),
            },
            bcrypt_cost: env_or("BCRYPT_COST", BCRYPT_COST),
        }
    }
}

/// Parse an env var, falling back to `default` when unset or unparsable.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
