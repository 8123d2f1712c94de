//! Domain models.
//!
//! These are internal domain models, distinct from the API request/response
//! types in `auth_engine_api::models`.

pub mod account;
pub mod auth;
