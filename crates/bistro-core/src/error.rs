// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Error types for the record store and payment provider seams.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// StoreError
// =============================================================================

/// Errors reported by a record store.
///
/// The authorization layer never retries or recovers from these; they
/// propagate to the HTTP layer as generic server failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot be reached.
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Description of the connectivity failure.
        message: String,
    },

    /// The store rejected the operation.
    #[error("store operation failed: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },
}

impl StoreError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

// =============================================================================
// PaymentError
// =============================================================================

/// Errors reported by the payment provider.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The requested amount cannot be charged.
    #[error("invalid amount: {message}")]
    InvalidAmount {
        /// Why the amount was rejected.
        message: String,
    },

    /// The provider rejected or failed the request.
    #[error("payment provider error: {message}")]
    Provider {
        /// Description of the provider failure.
        message: String,
    },
}

impl PaymentError {
    /// Creates an invalid-amount error.
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        Self::InvalidAmount {
            message: message.into(),
        }
    }

    /// Creates a provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::unavailable("connection refused");
        assert_eq!(err.to_string(), "store unavailable: connection refused");
    }

    #[test]
    fn test_payment_error_display() {
        let err = PaymentError::invalid_amount("amount must be positive");
        assert_eq!(err.to_string(), "invalid amount: amount must be positive");
    }
}
