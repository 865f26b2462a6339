// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Binary-level error types.

use thiserror::Error;

/// Result type alias for binary operations.
pub type BinResult<T> = Result<T, BinError>;

/// Errors surfaced by the CLI binary.
#[derive(Debug, Error)]
pub enum BinError {
    /// Configuration loading or validation failed.
    #[error("configuration error: {0}")]
    Config(#[from] bistro_config::ConfigError),

    /// A component failed to initialize.
    #[error("initialization error: {0}")]
    Initialization(String),

    /// The API server failed.
    #[error("server error: {0}")]
    Server(#[from] bistro_api::ApiError),
}
