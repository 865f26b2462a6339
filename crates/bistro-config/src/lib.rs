// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! # bistro-config
//!
//! Configuration management for the Bistro ordering backend.
//!
//! Configuration is loaded once at startup from a YAML or TOML file, then
//! overridden from `BISTRO_*` environment variables and validated. The JWT
//! signing secret and the store connection string are treated as opaque
//! process-wide settings; a missing secret is a startup failure, never a
//! per-request error.
//!
//! ```no_run
//! use bistro_config::load_config;
//!
//! let config = load_config("bistro.yaml").unwrap();
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, ConfigLoader};
pub use schema::{
    BistroConfig, CorsSettings, JwtSettings, LoggingSettings, SecuritySettings, ServerSettings,
    StoreSettings,
};
