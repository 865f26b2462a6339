// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Test fixtures and request harness.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use bistro_api::{ApiConfig, ApiServer, AppState, JwtConfig};
use bistro_core::{MemoryStore, Role, UserStore};

/// Signing secret used across the integration tests.
pub const TEST_SECRET: &str = "integration-test-secret-key-long-enough";

/// A fully assembled backend over an in-memory store.
///
/// Holds the store handle alongside the router so tests can both drive HTTP
/// and inspect state directly.
pub struct TestBackend {
    /// The shared in-memory store.
    pub store: Arc<MemoryStore>,
    /// Application state the router was built from.
    pub state: AppState,
    /// The assembled router.
    pub router: Router,
}

impl TestBackend {
    /// Builds a backend with an empty store.
    pub fn new() -> Self {
        Self::with_state(|builder| builder)
    }

    /// Builds a backend, letting the caller adjust the state builder.
    pub fn with_state(
        adjust: impl FnOnce(bistro_api::state::AppStateBuilder) -> bistro_api::state::AppStateBuilder,
    ) -> Self {
        let store = Arc::new(MemoryStore::new());

        let config = ApiConfig::default().with_jwt(JwtConfig::new(TEST_SECRET));
        let builder = AppState::builder().config(config).memory_store(store.clone());
        let state = adjust(builder).build().expect("state must build");

        let router = ApiServer::new(state.clone()).router();

        Self {
            store,
            state,
            router,
        }
    }

    /// Seeds a user and returns their record id.
    pub fn seed_user(&self, name: &str, email: &str, role: Role) -> bistro_core::RecordId {
        self.store.seed_user(name, email, role)
    }

    /// Issues a valid credential for the given email.
    pub fn token_for(&self, email: &str) -> String {
        self.state
            .jwt()
            .issue(email, None)
            .expect("token issuance must succeed")
    }

    /// Issues a credential signed by a different secret.
    pub fn foreign_token_for(&self, email: &str) -> String {
        let foreign = bistro_api::JwtManager::new(JwtConfig::new(
            "a-completely-different-secret-key-000000",
        ))
        .unwrap();
        foreign.issue(email, None).unwrap()
    }

    /// Issues an already-expired credential with the right secret.
    pub fn expired_token_for(&self, email: &str) -> String {
        let expired =
            bistro_api::JwtManager::new(JwtConfig::new(TEST_SECRET).with_token_ttl(-3600)).unwrap();
        expired.issue(email, None).unwrap()
    }

    /// Sends a request and returns status plus parsed JSON body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router must not error");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body must collect")
            .to_bytes();

        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Convenience GET.
    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        self.request(Method::GET, path, token, None).await
    }

    /// Convenience POST with JSON body.
    pub async fn post(
        &self,
        path: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.request(Method::POST, path, token, Some(body)).await
    }
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Asserts a user's role directly against the store.
pub async fn assert_role(store: &MemoryStore, email: &str, expected_admin: bool) {
    let user = store
        .find_by_email(email)
        .await
        .expect("store lookup must succeed")
        .expect("user must exist");
    assert_eq!(user.is_admin(), expected_admin);
}
