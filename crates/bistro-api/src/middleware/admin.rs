// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Administrator authorization middleware.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use crate::auth::{AuthContext, RoleResolver};
use crate::error::ApiError;

// =============================================================================
// AdminLayer
// =============================================================================

/// Layer restricting routes to administrators.
///
/// Reads the caller email from the [`AuthContext`] the authentication gate
/// attached — never from the request body or query — and resolves the stored
/// role through the injected [`RoleResolver`]. Non-admin callers get 403.
///
/// The router always composes this inside [`super::AuthLayer`]; a request
/// arriving without a context (the composition contract violated) is answered
/// 401 rather than faulting.
#[derive(Clone)]
pub struct AdminLayer {
    resolver: RoleResolver,
}

impl AdminLayer {
    /// Creates an admin layer over the given role resolver.
    pub fn new(resolver: RoleResolver) -> Self {
        Self { resolver }
    }
}

impl<S> Layer<S> for AdminLayer {
    type Service = AdminMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AdminMiddleware {
            inner,
            resolver: self.resolver.clone(),
        }
    }
}

// =============================================================================
// AdminMiddleware
// =============================================================================

/// Middleware service for the admin check.
#[derive(Clone)]
pub struct AdminMiddleware<S> {
    inner: S,
    resolver: RoleResolver,
}

impl<S> Service<Request<Body>> for AdminMiddleware<S>
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

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let resolver = self.resolver.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let Some(auth_ctx) = req.extensions().get::<AuthContext>().cloned() else {
                tracing::warn!("admin gate reached without auth context, denying");
                return Ok(
                    ApiError::unauthorized("admin gate invoked before authentication")
                        .into_response(),
                );
            };

            // One store lookup; a missing record is an ordinary non-admin.
            match resolver.is_admin(&auth_ctx.email).await {
                Ok(true) => inner.call(req).await,
                Ok(false) => {
                    tracing::debug!(email = %auth_ctx.email, "admin privilege denied");
                    Ok(ApiError::forbidden(format!(
                        "caller {} lacks the administrator role",
                        auth_ctx.email
                    ))
                    .into_response())
                }
                Err(e) => Ok(e.into_response()),
            }
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
