// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! API server implementation.
//!
//! The router is assembled from three groups so gate composition is fixed
//! structurally:
//!
//! - public routes carry no gate;
//! - authenticated routes carry [`AuthLayer`];
//! - admin routes carry [`AuthLayer`] outside [`AdminLayer`], so the
//!   authorization gate can never run before authentication.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::handlers;
use crate::middleware::{AdminLayer, AuthLayer};
use crate::state::AppState;

// =============================================================================
// ApiServer
// =============================================================================

/// The API server.
pub struct ApiServer {
    state: AppState,
    config: Arc<ApiConfig>,
}

impl ApiServer {
    /// Creates a server with the given state.
    pub fn new(state: AppState) -> Self {
        let config = state.config.clone();
        Self { state, config }
    }

    /// Creates the router with all routes and gates.
    pub fn router(&self) -> Router {
        let auth = AuthLayer::new(self.state.jwt_manager.clone());
        let admin = AdminLayer::new(self.state.role_resolver.clone());

        let public = Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route("/ready", get(handlers::ready))
            .route("/jwt", post(handlers::issue_token))
            .route("/api/user", post(handlers::register_user))
            .route("/api/menu", get(handlers::list_menu))
            .route(
                "/api/reviews",
                get(handlers::list_reviews).post(handlers::submit_review),
            );

        let authenticated = Router::new()
            .route("/api/user/admin/{id}", get(handlers::admin_status))
            .route(
                "/api/carts",
                get(handlers::list_cart).post(handlers::add_cart_item),
            )
            .route("/api/carts/{id}", delete(handlers::remove_cart_item))
            .route("/api/payment/{email}", get(handlers::payment_history))
            .route("/api/payment-intent", post(handlers::create_payment_intent))
            .route("/api/payment", post(handlers::record_payment))
            .route_layer(auth.clone());

        // Auth must be the outer layer here: it populates the context the
        // admin gate reads.
        let admin_only = Router::new()
            .route("/api/user", get(handlers::list_users))
            .route("/api/user/admin/{id}", patch(handlers::promote_user))
            .route("/api/user/{id}", delete(handlers::delete_user))
            .route("/api/menu", post(handlers::add_menu_item))
            .route("/api/menu/{id}", delete(handlers::remove_menu_item))
            .route("/api/admin-stats", get(handlers::admin_stats))
            .route("/api/order-stats", get(handlers::order_stats))
            .route_layer(ServiceBuilder::new().layer(auth).layer(admin));

        let middleware_stack = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(self.config.request_timeout))
            .layer(create_cors_layer(&self.config));

        Router::new()
            .merge(public)
            .merge(authenticated)
            .merge(admin_only)
            .layer(middleware_stack)
            .with_state(self.state.clone())
    }

    /// Runs the server.
    pub async fn run(self) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let router = self.router();

        info!("starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::internal(format!("failed to bind: {e}")))?;

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(|e| ApiError::internal(format!("server error: {e}")))?;

        Ok(())
    }

    /// Runs the server with graceful shutdown.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let router = self.router();

        info!("starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::internal(format!("failed to bind: {e}")))?;

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| ApiError::internal(format!("server error: {e}")))?;

        info!("API server shutdown complete");

        Ok(())
    }

    /// Returns the server bind address.
    pub fn addr(&self) -> SocketAddr {
        self.config.socket_addr()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Creates the CORS layer from configuration.
fn create_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = &config.cors;

    let mut layer = CorsLayer::new().max_age(Duration::from_secs(cors.max_age));

    if cors.allowed_origins.contains(&"*".to_string()) {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    layer.allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}

// =============================================================================
// Server Builder
// =============================================================================

/// Builder for creating the API server.
pub struct ApiServerBuilder {
    state_builder: crate::state::AppStateBuilder,
}

impl ApiServerBuilder {
    /// Creates a new server builder.
    pub fn new() -> Self {
        Self {
            state_builder: AppState::builder(),
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.state_builder = self.state_builder.config(config);
        self
    }

    /// Uses one in-memory store handle for every collection.
    pub fn memory_store(mut self, store: Arc<bistro_core::MemoryStore>) -> Self {
        self.state_builder = self.state_builder.memory_store(store);
        self
    }

    /// Sets the payment provider.
    pub fn payment_provider(mut self, provider: Arc<dyn bistro_core::PaymentProvider>) -> Self {
        self.state_builder = self.state_builder.payment_provider(provider);
        self
    }

    /// Builds the server.
    pub fn build(self) -> ApiResult<ApiServer> {
        let state = self.state_builder.build()?;
        Ok(ApiServer::new(state))
    }
}

impl Default for ApiServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;

    fn test_config() -> ApiConfig {
        ApiConfig::default().with_jwt(JwtConfig::new("test-secret-key-that-is-long-enough"))
    }

    #[test]
    fn test_server_builder() {
        let server = ApiServerBuilder::new().config(test_config()).build().unwrap();
        assert_eq!(server.addr().port(), 5000);
    }

    #[test]
    fn test_router_creation() {
        let server = ApiServerBuilder::new().config(test_config()).build().unwrap();
        let _router = server.router();
    }

    #[test]
    fn test_cors_layer() {
        let _layer = create_cors_layer(&test_config());
    }
}
