// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Custom extractors for API handlers.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::AuthContext;
use crate::error::ApiError;

// =============================================================================
// Auth Extractor
// =============================================================================

/// Extractor for authenticated requests.
///
/// Pulls the [`AuthContext`] the authentication gate attached to the request.
/// Returns 401 if the gate did not run, so a handler using this extractor can
/// never observe an unauthenticated request.
///
/// ```rust,ignore
/// async fn handler(Auth(ctx): Auth) -> impl IntoResponse {
///     format!("hello, {}", ctx.email)
/// }
/// ```
pub struct Auth(pub AuthContext);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(Auth)
            .ok_or_else(|| ApiError::unauthorized("request reached handler unauthenticated"))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Claims;
    use axum::http::Request;

    #[tokio::test]
    async fn test_auth_extractor_present() {
        let mut req = Request::builder().uri("/test").body(()).unwrap();
        req.extensions_mut()
            .insert(AuthContext::from_claims(&Claims::new("ada@example.com", 3600)));
        let (mut parts, _) = req.into_parts();

        let Auth(ctx) = Auth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ctx.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_auth_extractor_missing() {
        let req = Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _) = req.into_parts();

        let result = Auth::from_request_parts(&mut parts, &()).await;
        assert!(result.is_err());
    }
}
