// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Health and banner handlers.

use axum::{response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Version string.
    pub version: String,
}

/// GET /
///
/// Service banner.
pub async fn root() -> &'static str {
    "Bistro backend is running"
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

/// GET /ready
pub async fn ready() -> impl IntoResponse {
    Json(serde_json::json!({ "ready": true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health_is_ok() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_banner() {
        assert!(root().await.contains("Bistro"));
    }
}
