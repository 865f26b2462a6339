// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Payment-provider seam.
//!
//! The provider exposes exactly one operation: creating a payment intent for
//! an amount in minor currency units. Provider internals (card handling,
//! webhooks, settlement) live on the other side of this trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PaymentError;

// =============================================================================
// PaymentIntent
// =============================================================================

/// A provider-side intent awaiting client confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider intent id.
    pub id: String,
    /// Secret the client uses to confirm the intent.
    pub client_secret: String,
    /// Amount in minor currency units.
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
}

// =============================================================================
// PaymentProvider
// =============================================================================

/// External payment provider collaborator.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Creates a payment intent for `amount` minor units of `currency`.
    async fn create_intent(&self, amount: i64, currency: &str)
        -> Result<PaymentIntent, PaymentError>;
}

// =============================================================================
// TestPaymentProvider
// =============================================================================

/// Deterministic provider used in development and tests.
///
/// Generates intent ids and client secrets locally; rejects non-positive
/// amounts the way the real provider would.
#[derive(Debug, Default)]
pub struct TestPaymentProvider;

impl TestPaymentProvider {
    /// Creates a new test provider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentProvider for TestPaymentProvider {
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        if amount <= 0 {
            return Err(PaymentError::invalid_amount(format!(
                "amount must be positive, got {amount}"
            )));
        }
        if currency.len() != 3 {
            return Err(PaymentError::provider(format!(
                "unknown currency '{currency}'"
            )));
        }

        let id = format!("pi_{}", Uuid::now_v7().simple());
        let client_secret = format!("{id}_secret_{}", Uuid::now_v7().simple());

        Ok(PaymentIntent {
            id,
            client_secret,
            amount,
            currency: currency.to_string(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
