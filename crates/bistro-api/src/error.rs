// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! API error types and HTTP mapping.
//!
//! Every rejection leaves the process as a JSON body of the form
//! `{"message": ...}`. The 401 and 403 bodies are part of the wire contract
//! and always read `"Unauthorized access"` and `"Forbidden access"`; the
//! detail strings the constructors take are for logs only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bistro_core::{PaymentError, StoreError};

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// ApiError
// =============================================================================

/// API error type with HTTP status code mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed or expired credential (401).
    #[error("unauthorized: {detail}")]
    Unauthorized {
        /// Internal detail, logged but never sent to clients.
        detail: String,
    },

    /// Authenticated but not allowed (403).
    #[error("forbidden: {detail}")]
    Forbidden {
        /// Internal detail, logged but never sent to clients.
        detail: String,
    },

    /// Malformed request (400).
    #[error("bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Resource not found (404).
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// Record store failure (503).
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Payment provider failure (402 for rejected amounts, 502 otherwise).
    #[error("payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Internal server error (500).
    #[error("internal error: {message}")]
    Internal {
        /// Error message, for logging only.
        message: String,
    },
}

impl ApiError {
    /// Creates an unauthorized error; `detail` is logged, not returned.
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::Unauthorized {
            detail: detail.into(),
        }
    }

    /// Creates a forbidden error; `detail` is logged, not returned.
    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Forbidden {
            detail: detail.into(),
        }
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Payment(PaymentError::InvalidAmount { .. }) => StatusCode::PAYMENT_REQUIRED,
            ApiError::Payment(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message sent to clients.
    ///
    /// The 401/403 strings are canonical and never vary with the internal
    /// detail; server-side faults are reported without detail.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized { .. } => "Unauthorized access".to_string(),
            ApiError::Forbidden { .. } => "Forbidden access".to_string(),
            ApiError::BadRequest { message } => message.clone(),
            ApiError::NotFound { resource } => format!("{resource} not found"),
            ApiError::Store(_) => "service unavailable".to_string(),
            ApiError::Payment(PaymentError::InvalidAmount { message }) => message.clone(),
            ApiError::Payment(_) => "payment provider unavailable".to_string(),
            ApiError::Internal { .. } => "internal server error".to_string(),
        }
    }

    /// Returns `true` if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            ApiError::Store(_) | ApiError::Internal { .. } | ApiError::Payment(PaymentError::Provider { .. })
        )
    }
}

// =============================================================================
// Wire body
// =============================================================================

/// JSON body carried by every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!(error = %self, status = %status, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }

        let body = ErrorBody {
            message: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::unauthorized("no header").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::forbidden("not admin").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::bad_request("bad json").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(StoreError::unavailable("down")).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_canonical_rejection_messages() {
        // The internal detail must never leak into the wire body.
        let unauthorized = ApiError::unauthorized("signature mismatch on token abc");
        assert_eq!(unauthorized.user_message(), "Unauthorized access");

        let forbidden = ApiError::forbidden("role=Default on admin route");
        assert_eq!(forbidden.user_message(), "Forbidden access");
    }

    #[test]
    fn test_store_error_does_not_leak_detail() {
        let err = ApiError::from(StoreError::backend("index corrupt at page 7"));
        assert_eq!(err.user_message(), "service unavailable");
        assert!(err.is_server_error());
    }

    #[test]
    fn test_invalid_amount_maps_to_payment_required() {
        let err = ApiError::from(PaymentError::invalid_amount("amount must be positive"));
        assert_eq!(err.status_code(), StatusCode::PAYMENT_REQUIRED);
    }
}
