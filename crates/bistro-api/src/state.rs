// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Application state shared across handlers.

use std::sync::Arc;

use bistro_core::{
    CartStore, MemoryStore, MenuStore, PaymentProvider, PaymentStore, ReviewStore, StatsStore,
    TestPaymentProvider, UserStore,
};

use crate::auth::{JwtManager, RoleResolver};
use crate::config::ApiConfig;
use crate::error::ApiResult;

// =============================================================================
// AppState
// =============================================================================

/// Application state passed to all handlers via axum's state extraction.
///
/// Every collaborator is an explicit `Arc` handle injected at construction;
/// the gates receive the same handles, so nothing in the request path captures
/// implicit global state.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Credential issuer/verifier.
    pub jwt_manager: Arc<JwtManager>,
    /// Role resolver over the identity store.
    pub role_resolver: RoleResolver,
    /// Identity record store.
    pub user_store: Arc<dyn UserStore>,
    /// Menu catalog store.
    pub menu_store: Arc<dyn MenuStore>,
    /// Review store.
    pub review_store: Arc<dyn ReviewStore>,
    /// Cart store.
    pub cart_store: Arc<dyn CartStore>,
    /// Payment record store.
    pub payment_store: Arc<dyn PaymentStore>,
    /// Aggregate reporting store.
    pub stats_store: Arc<dyn StatsStore>,
    /// Payment provider.
    pub payment_provider: Arc<dyn PaymentProvider>,
}

impl AppState {
    /// Creates a new state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Returns the credential manager.
    pub fn jwt(&self) -> &JwtManager {
        &self.jwt_manager
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing [`AppState`].
///
/// Store handles not set explicitly default to one shared in-memory store;
/// the payment provider defaults to the deterministic test provider.
pub struct AppStateBuilder {
    config: Option<ApiConfig>,
    jwt_manager: Option<Arc<JwtManager>>,
    user_store: Option<Arc<dyn UserStore>>,
    menu_store: Option<Arc<dyn MenuStore>>,
    review_store: Option<Arc<dyn ReviewStore>>,
    cart_store: Option<Arc<dyn CartStore>>,
    payment_store: Option<Arc<dyn PaymentStore>>,
    stats_store: Option<Arc<dyn StatsStore>>,
    payment_provider: Option<Arc<dyn PaymentProvider>>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            jwt_manager: None,
            user_store: None,
            menu_store: None,
            review_store: None,
            cart_store: None,
            payment_store: None,
            stats_store: None,
            payment_provider: None,
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the credential manager.
    pub fn jwt_manager(mut self, manager: Arc<JwtManager>) -> Self {
        self.jwt_manager = Some(manager);
        self
    }

    /// Uses one store handle for every collection it implements.
    pub fn memory_store(self, store: Arc<MemoryStore>) -> Self {
        self.user_store(store.clone())
            .menu_store(store.clone())
            .review_store(store.clone())
            .cart_store(store.clone())
            .payment_store(store.clone())
            .stats_store(store)
    }

    /// Sets the identity record store.
    pub fn user_store(mut self, store: Arc<dyn UserStore>) -> Self {
        self.user_store = Some(store);
        self
    }

    /// Sets the menu store.
    pub fn menu_store(mut self, store: Arc<dyn MenuStore>) -> Self {
        self.menu_store = Some(store);
        self
    }

    /// Sets the review store.
    pub fn review_store(mut self, store: Arc<dyn ReviewStore>) -> Self {
        self.review_store = Some(store);
        self
    }

    /// Sets the cart store.
    pub fn cart_store(mut self, store: Arc<dyn CartStore>) -> Self {
        self.cart_store = Some(store);
        self
    }

    /// Sets the payment record store.
    pub fn payment_store(mut self, store: Arc<dyn PaymentStore>) -> Self {
        self.payment_store = Some(store);
        self
    }

    /// Sets the aggregate reporting store.
    pub fn stats_store(mut self, store: Arc<dyn StatsStore>) -> Self {
        self.stats_store = Some(store);
        self
    }

    /// Sets the payment provider.
    pub fn payment_provider(mut self, provider: Arc<dyn PaymentProvider>) -> Self {
        self.payment_provider = Some(provider);
        self
    }

    /// Builds the state.
    ///
    /// Fails when the JWT configuration is invalid (missing secret).
    pub fn build(self) -> ApiResult<AppState> {
        let config = self.config.unwrap_or_default();

        let jwt_manager = match self.jwt_manager {
            Some(manager) => manager,
            None => Arc::new(JwtManager::new(config.jwt.clone())?),
        };

        let fallback: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let user_store = self.user_store.unwrap_or_else(|| fallback.clone());
        let role_resolver = RoleResolver::new(user_store.clone());

        Ok(AppState {
            config: Arc::new(config),
            jwt_manager,
            role_resolver,
            user_store,
            menu_store: self.menu_store.unwrap_or_else(|| fallback.clone()),
            review_store: self.review_store.unwrap_or_else(|| fallback.clone()),
            cart_store: self.cart_store.unwrap_or_else(|| fallback.clone()),
            payment_store: self.payment_store.unwrap_or_else(|| fallback.clone()),
            stats_store: self.stats_store.unwrap_or_else(|| fallback.clone()),
            payment_provider: self
                .payment_provider
                .unwrap_or_else(|| Arc::new(TestPaymentProvider::new())),
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// FromRef implementations
// =============================================================================

impl axum::extract::FromRef<AppState> for Arc<JwtManager> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_manager.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<ApiConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================
