// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Bearer-credential authentication middleware.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};
use uuid::Uuid;

use crate::auth::{AuthContext, JwtManager};
use crate::error::ApiError;

// =============================================================================
// AuthLayer
// =============================================================================

/// Layer that authenticates every request passing through it.
///
/// Applied with `route_layer` to the protected route groups; requests with a
/// missing or invalid bearer credential are answered 401 before their handler
/// runs, and successful requests carry an [`AuthContext`] in their extensions
/// from here on.
#[derive(Clone)]
pub struct AuthLayer {
    jwt_manager: Arc<JwtManager>,
}

impl AuthLayer {
    /// Creates an auth layer over the given credential verifier.
    pub fn new(jwt_manager: Arc<JwtManager>) -> Self {
        Self { jwt_manager }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            jwt_manager: self.jwt_manager.clone(),
        }
    }
}

// =============================================================================
// AuthMiddleware
// =============================================================================

/// Middleware service for credential verification.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    jwt_manager: Arc<JwtManager>,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let jwt_manager = self.jwt_manager.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // No header: reject before any decode attempt.
            let Some(token) = extract_bearer_token(&req) else {
                tracing::debug!("no authorization credential provided");
                return Ok(ApiError::unauthorized("missing Authorization header").into_response());
            };

            // Verification is purely local: signature and expiry against the
            // process-wide secret, no store access.
            let claims = match jwt_manager.verify(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::debug!(error = %e, "credential verification failed");
                    return Ok(e.into_response());
                }
            };

            let client_ip = req
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ci| ci.0.ip());

            let mut auth_ctx = AuthContext::from_claims(&claims).with_request_id(Uuid::now_v7());
            if let Some(ip) = client_ip {
                auth_ctx = auth_ctx.with_client_ip(ip);
            }

            req.extensions_mut().insert(auth_ctx);

            inner.call(req).await
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Extracts the bearer credential from the `Authorization` header.
///
/// The header is split on whitespace and the second token taken, so
/// `Bearer <credential>` yields the credential and a bare scheme yields
/// nothing.
fn extract_bearer_token<B>(req: &Request<B>) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .filter(|value| value.starts_with("Bearer"))
        .and_then(|value| value.split_whitespace().nth(1).map(|s| s.to_string()))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use axum::http::{HeaderValue, StatusCode};
    use tower::ServiceExt;

    fn manager() -> Arc<JwtManager> {
        Arc::new(JwtManager::new(JwtConfig::new("test-secret-key-that-is-long-enough")).unwrap())
    }

    fn echo_service() -> impl Service<
        Request<Body>,
        Response = Response,
        Error = std::convert::Infallible,
        Future = impl Future<Output = Result<Response, std::convert::Infallible>> + Send,
    > + Clone
           + Send {
        tower::service_fn(|req: Request<Body>| async move {
            // Report whether the context was attached.
            let attached = req.extensions().get::<AuthContext>().is_some();
            let status = if attached {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            Ok::<_, std::convert::Infallible>(status.into_response())
        })
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut req = Request::builder().uri("/test").body(Body::empty()).unwrap();
        assert!(extract_bearer_token(&req).is_none());

        req.headers_mut()
            .insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(extract_bearer_token(&req).is_none());

        req.headers_mut().insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer mytoken123"),
        );
        assert_eq!(extract_bearer_token(&req), Some("mytoken123".to_string()));

        // Scheme with no credential.
        req.headers_mut()
            .insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer"));
        assert!(extract_bearer_token(&req).is_none());
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let mut service = AuthLayer::new(manager()).layer(echo_service());

        let req = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response = service.ready().await.unwrap().call(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        let mut service = AuthLayer::new(manager()).layer(echo_service());

        let req = Request::builder()
            .uri("/test")
            .header(header::AUTHORIZATION, "Bearer not.a.token")
            .body(Body::empty())
            .unwrap();
        let response = service.ready().await.unwrap().call(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_attaches_context() {
        let jwt = manager();
        let token = jwt.issue("ada@example.com", None).unwrap();
        let mut service = AuthLayer::new(jwt).layer(echo_service());

        let req = Request::builder()
            .uri("/test")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let response = service.ready().await.unwrap().call(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
