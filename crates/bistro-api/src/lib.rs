// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! # bistro-api
//!
//! HTTP API server for the Bistro ordering backend.
//!
//! The heart of this crate is the request authorization layer:
//!
//! - [`auth::JwtManager`] issues and verifies signed, time-limited credentials
//! - [`middleware::AuthLayer`] authenticates every protected request
//! - [`auth::RoleResolver`] looks up the caller's stored role by email
//! - [`middleware::AdminLayer`] rejects non-administrators from privileged routes
//! - [`auth::AuthContext::ensure_owns`] restricts identity-scoped routes to
//!   their owner
//!
//! Everything else is a thin pass-through to the record store and the payment
//! provider, both injected through [`state::AppState`].

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;
pub mod state;

pub use auth::{AuthContext, Claims, JwtConfig, JwtManager, RoleResolver};
pub use config::{ApiConfig, CorsConfig};
pub use error::{ApiError, ApiResult};
pub use server::{ApiServer, ApiServerBuilder};
pub use state::AppState;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
