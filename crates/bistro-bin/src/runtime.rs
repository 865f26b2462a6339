// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Backend runtime orchestration.
//!
//! Builds the running system in order: configuration, credential manager,
//! record store, payment provider, API server; then serves until shutdown.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use bistro_api::{ApiConfig, ApiServer, AppState, JwtConfig};
use bistro_config::BistroConfig;
use bistro_core::{MemoryStore, Role, TestPaymentProvider};

use crate::error::{BinError, BinResult};
use crate::shutdown::ShutdownCoordinator;

// =============================================================================
// BackendRuntime
// =============================================================================

/// Orchestrates startup and shutdown of the backend.
pub struct BackendRuntime {
    config: BistroConfig,
    shutdown: ShutdownCoordinator,
    dev_mode: bool,
}

impl BackendRuntime {
    /// Creates a runtime over validated configuration.
    pub fn new(config: BistroConfig) -> Self {
        Self {
            config,
            shutdown: ShutdownCoordinator::new(),
            dev_mode: false,
        }
    }

    /// Enables development mode (seeds a demo admin account).
    pub fn with_dev_mode(mut self, enabled: bool) -> Self {
        self.dev_mode = enabled;
        self
    }

    /// Returns the shutdown coordinator.
    pub fn shutdown_coordinator(&self) -> &ShutdownCoordinator {
        &self.shutdown
    }

    /// Runs the backend until shutdown is signaled.
    pub async fn run(self) -> BinResult<()> {
        info!("starting Bistro backend v{}", bistro_core::VERSION);

        let server = self.build_server()?;
        let signal = self.shutdown.signal();

        server.run_with_shutdown(signal).await?;

        info!("Bistro backend shutdown complete");
        Ok(())
    }

    /// Assembles the API server from configuration.
    pub fn build_server(&self) -> BinResult<ApiServer> {
        let api_config = self.api_config()?;

        let store = Arc::new(MemoryStore::new());
        if let Some(uri) = &self.config.store.uri {
            // External store backends hang off this seam; until one is
            // configured in, the in-memory store serves the process.
            warn!(uri = %uri, "external store configured but not compiled in, using memory store");
        }

        if self.dev_mode {
            let email = "admin@bistro.local";
            store.seed_user("Dev Admin", email, Role::Admin);
            warn!(email, "dev mode: seeded demo admin account");
        }

        let state = AppState::builder()
            .config(api_config)
            .memory_store(store)
            .payment_provider(Arc::new(TestPaymentProvider::new()))
            .build()?;

        Ok(ApiServer::new(state))
    }

    /// Maps file configuration to the API server's runtime configuration.
    fn api_config(&self) -> BinResult<ApiConfig> {
        let host: IpAddr = self.config.server.host.parse().map_err(|_| {
            BinError::Initialization(format!(
                "invalid server host '{}'",
                self.config.server.host
            ))
        })?;

        let jwt = JwtConfig::new(self.config.security.jwt.secret.clone())
            .with_token_ttl(self.config.security.jwt.token_ttl_secs);

        let mut api_config = ApiConfig::new()
            .with_host(host)
            .with_port(self.config.server.port)
            .with_jwt(jwt);
        api_config.request_timeout = Duration::from_secs(self.config.server.request_timeout_secs);
        api_config.cors.allowed_origins = self.config.cors.allowed_origins.clone();
        api_config.cors.allowed_methods = self.config.cors.allowed_methods.clone();
        api_config.cors.max_age = self.config.cors.max_age_secs;

        Ok(api_config)
    }
}

// =============================================================================
// Tests
// =============================================================================
