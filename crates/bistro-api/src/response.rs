// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! API response types.
//!
//! Wire field names follow the record store's acknowledgement shapes
//! (`insertedId`, `matchedCount`, `deletedCount`, ...) so existing clients of
//! the original backend keep working unchanged.

use serde::{Deserialize, Serialize};

use bistro_core::RecordId;

// =============================================================================
// Token issuance
// =============================================================================

/// Response for a successful credential issuance.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed credential.
    pub token: String,
}

// =============================================================================
// Admin status
// =============================================================================

/// Response for the boolean admin-status route.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminStatusResponse {
    /// Whether the queried identity carries the administrator role.
    pub admin: bool,
}

// =============================================================================
// Write acknowledgements
// =============================================================================

/// Response for an insert operation.
///
/// `inserted_id` is always serialized, as `null` when nothing was written —
/// the idempotent-registration sentinel relies on that.
#[derive(Debug, Serialize, Deserialize)]
pub struct InsertResponse {
    /// Sentinel or status message, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Id of the created record, `null` when nothing was created.
    #[serde(rename = "insertedId")]
    pub inserted_id: Option<RecordId>,
}

impl InsertResponse {
    /// Acknowledges a created record.
    pub fn created(id: RecordId) -> Self {
        Self {
            message: None,
            inserted_id: Some(id),
        }
    }

    /// The idempotent-registration sentinel.
    pub fn already_exists() -> Self {
        Self {
            message: Some("user already exists".to_string()),
            inserted_id: None,
        }
    }
}

// =============================================================================
// Payments
// =============================================================================

/// Response for payment-intent creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentIntentResponse {
    /// Secret the client uses to confirm the intent.
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

/// Response for recording a payment: the insert acknowledgement plus how many
/// cart lines the payment settled.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentRecordedResponse {
    /// Id of the recorded payment.
    #[serde(rename = "insertedId")]
    pub inserted_id: RecordId,
    /// Number of cart lines removed.
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_sentinel_shape() {
        let json = serde_json::to_value(InsertResponse::already_exists()).unwrap();
        assert_eq!(json["message"], "user already exists");
        assert!(json["insertedId"].is_null());
    }

    #[test]
    fn test_created_shape() {
        let id = RecordId::generate();
        let json = serde_json::to_value(InsertResponse::created(id.clone())).unwrap();
        assert_eq!(json["insertedId"], id.to_string());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_client_secret_field_name() {
        let json = serde_json::to_value(PaymentIntentResponse {
            client_secret: "pi_x_secret_y".to_string(),
        })
        .unwrap();
        assert_eq!(json["clientSecret"], "pi_x_secret_y");
    }
}
