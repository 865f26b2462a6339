// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Configuration loading.
//!
//! Loading pipeline:
//!
//! 1. Parse the YAML or TOML file (selected by extension)
//! 2. Apply `BISTRO_*` environment variable overrides
//! 3. Validate the result
//!
//! A missing file is not an error when defaults plus environment variables
//! form a valid configuration; this keeps container deployments that configure
//! everything through the environment working without a config file.

use std::env;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::schema::BistroConfig;

// =============================================================================
// ConfigLoader
// =============================================================================

/// Loader for [`BistroConfig`].
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_prefix: String,
    apply_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader with the default `BISTRO` environment prefix.
    pub fn new() -> Self {
        Self {
            env_prefix: "BISTRO".to_string(),
            apply_env: true,
        }
    }

    /// Sets the environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Enables or disables environment overrides.
    pub fn with_env_overrides(mut self, enabled: bool) -> Self {
        self.apply_env = enabled;
        self
    }

    /// Loads, overrides and validates configuration from `path`.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<BistroConfig> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            info!(path = %path.display(), "loading configuration file");
            self.parse_file(path)?
        } else {
            debug!(path = %path.display(), "config file not found, using defaults");
            BistroConfig::default()
        };

        if self.apply_env {
            self.apply_env_overrides(&mut config);
        }

        config.validate()?;
        Ok(config)
    }

    fn parse_file(&self, path: &Path) -> ConfigResult<BistroConfig> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "yaml" | "yml" => {
                serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
            "toml" => toml::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            other => Err(ConfigError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }

    fn apply_env_overrides(&self, config: &mut BistroConfig) {
        if let Some(secret) = self.env_var("JWT_SECRET") {
            config.security.jwt.secret = secret;
        }
        if let Some(host) = self.env_var("API_HOST") {
            config.server.host = host;
        }
        if let Some(port) = self.env_var("API_PORT").and_then(|p| p.parse().ok()) {
            config.server.port = port;
        }
        if let Some(uri) = self.env_var("STORE_URI") {
            config.store.uri = Some(uri);
        }
        if let Some(level) = self.env_var("LOG_LEVEL") {
            config.logging.level = level;
        }
    }

    fn env_var(&self, key: &str) -> Option<String> {
        env::var(format!("{}_{}", self.env_prefix, key)).ok()
    }
}

/// Loads configuration from `path` with the default loader.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<BistroConfig> {
    ConfigLoader::new().load(path)
}

// =============================================================================
// Tests
// =============================================================================
