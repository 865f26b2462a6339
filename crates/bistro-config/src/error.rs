// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file '{path}': {message}")]
    Io {
        /// Path to the configuration file.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// The configuration file could not be parsed.
    #[error("failed to parse config file '{path}': {message}")]
    Parse {
        /// Path to the configuration file.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// The file extension is not a supported configuration format.
    #[error("unsupported config format '{extension}' (expected yaml, yml or toml)")]
    UnsupportedFormat {
        /// The offending extension.
        extension: String,
    },

    /// A configuration value failed validation.
    #[error("invalid value for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },
}

impl ConfigError {
    /// Creates a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = ConfigError::validation("security.jwt.secret", "must not be empty");
        assert_eq!(
            err.to_string(),
            "invalid value for 'security.jwt.secret': must not be empty"
        );
    }
}
