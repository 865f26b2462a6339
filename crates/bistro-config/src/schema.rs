// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Configuration schema.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// BistroConfig
// =============================================================================

/// Top-level configuration for the Bistro backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BistroConfig {
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Security settings (JWT signing).
    pub security: SecuritySettings,
    /// Record store settings.
    pub store: StoreSettings,
    /// CORS settings.
    pub cors: CorsSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

impl BistroConfig {
    /// Validates the configuration.
    ///
    /// The signing secret is required: an empty secret would make every
    /// issued credential forgeable, so startup refuses instead.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.security.jwt.secret.is_empty() {
            return Err(ConfigError::validation(
                "security.jwt.secret",
                "signing secret must not be empty (set BISTRO_JWT_SECRET)",
            ));
        }
        if self.security.jwt.secret.len() < 32 {
            tracing::warn!("JWT secret is shorter than recommended (32 bytes)");
        }
        if self.security.jwt.token_ttl_secs <= 0 {
            return Err(ConfigError::validation(
                "security.jwt.token_ttl_secs",
                "token lifetime must be positive",
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::validation("server.port", "port must not be 0"));
        }
        Ok(())
    }
}

// =============================================================================
// Sections
// =============================================================================

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            request_timeout_secs: 30,
        }
    }
}

/// Security settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    /// JWT settings.
    pub jwt: JwtSettings,
}

/// JWT signing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtSettings {
    /// Process-wide signing secret. Must be set before startup.
    #[serde(skip_serializing)]
    pub secret: String,
    /// Credential lifetime in seconds.
    pub token_ttl_secs: i64,
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_ttl_secs: 3600, // 1 hour
        }
    }
}

/// Record store settings.
///
/// The connection string is opaque to this layer; when absent the process
/// falls back to the in-memory store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Store connection string.
    pub uri: Option<String>,
}

/// CORS settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    /// Allowed origins; `*` allows any.
    pub allowed_origins: Vec<String>,
    /// Allowed methods.
    pub allowed_methods: Vec<String>,
    /// Max age for preflight cache, in seconds.
    pub max_age_secs: u64,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec![
                "GET".to_string(),
                "POST".to_string(),
                "PATCH".to_string(),
                "DELETE".to_string(),
                "OPTIONS".to_string(),
            ],
            max_age_secs: 3600,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
    /// Log format (text, json, compact).
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret() -> BistroConfig {
        let mut config = BistroConfig::default();
        config.security.jwt.secret = "a-signing-secret-long-enough-for-tests".to_string();
        config
    }

    #[test]
    fn test_defaults() {
        let config = BistroConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.security.jwt.token_ttl_secs, 3600);
        assert!(config.store.uri.is_none());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = BistroConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_config_accepted() {
        assert!(config_with_secret().validate().is_ok());
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let mut config = config_with_secret();
        config.security.jwt.token_ttl_secs = 0;
        assert!(config.validate().is_err());
    }
}
