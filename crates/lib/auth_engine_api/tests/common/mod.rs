//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use auth_engine_api::config::ApiConfig;
use auth_engine_api::{AppState, router};
use auth_engine_core::models::auth::TokenLifetimes;
use auth_engine_core::store::MemoryAccountStore;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret";
pub const PASSWORD: &str = "TestPassword123!";

/// Router over a fresh in-memory store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryAccountStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryAccountStore::new());
        let state = AppState {
            store: store.clone(),
            config: ApiConfig {
                bind_addr: "127.0.0.1:0".into(),
                jwt_secret: JWT_SECRET.into(),
                token_lifetimes: TokenLifetimes::default(),
                bcrypt_cost: 4,
            },
        };
        Self {
            router: router(state),
            store,
        }
    }

    /// Send a request, returning the status and the parsed JSON body
    /// (`Value::Null` for an empty body).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = self.router.clone().oneshot(request).await.expect("request");
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Send a raw body with an optional `Content-Type`.
    pub async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        bearer: Option<&str>,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, Option<String>, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        let resp = self.router.clone().oneshot(request).await.expect("request");
        let status = resp.status();
        let ct = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, ct, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, None, Some(body)).await
    }

    /// Register an account, asserting success.
    pub async fn register(&self, name: &str, email: &str) -> Value {
        let (status, body) = self
            .post(
                "/api/register",
                serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": PASSWORD,
                    "password2": PASSWORD,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body
    }

    /// Log in, returning `(access, refresh)`.
    pub async fn login(&self, email: &str) -> (String, String) {
        let (status, body) = self
            .post(
                "/api/token",
                serde_json::json!({"email": email, "password": PASSWORD}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        (
            body["access"].as_str().expect("access").to_string(),
            body["refresh"].as_str().expect("refresh").to_string(),
        )
    }
}

/// Assert a JSON body never exposes password material.
pub fn assert_no_password(body: &Value) {
    let text = body.to_string();
    assert!(!text.contains("password"), "password field leaked: {text}");
    assert!(!text.contains("$2"), "password hash leaked: {text}");
    assert!(!text.contains(PASSWORD), "plaintext password leaked: {text}");
}
