//! # auth_engine_core
//!
//! Core domain logic for Auth Engine: the account model, the account store,
//! credential handling, and input validation shared by the HTTP API and the
//! admin CLI.

pub mod accounts;
pub mod auth;
pub mod migrate;
pub mod models;
pub mod store;
pub mod validation;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
