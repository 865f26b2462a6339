// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Payment handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use bistro_core::{NewPayment, Payment, PaymentStatus, RecordId};

use crate::error::{ApiError, ApiResult};
use crate::extractors::Auth;
use crate::response::{PaymentIntentResponse, PaymentRecordedResponse};
use crate::state::AppState;

// =============================================================================
// Payment history
// =============================================================================

/// GET /api/payment/{email}  (authenticated, owner only)
///
/// Lists the caller's payment history.
pub async fn payment_history(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(email): Path<String>,
) -> ApiResult<Json<Vec<Payment>>> {
    ctx.ensure_owns(&email)?;

    let payments = state.payment_store.list_by_email(&email).await?;
    Ok(Json(payments))
}

// =============================================================================
// Payment intent
// =============================================================================

/// Request body for payment-intent creation.
#[derive(Debug, Deserialize)]
pub struct PaymentIntentRequest {
    /// Total price in major currency units.
    pub price: f64,
}

/// POST /api/payment-intent  (authenticated)
///
/// Creates a provider payment intent for the given price. The price is
/// converted to minor units before it reaches the provider.
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Json(request): Json<PaymentIntentRequest>,
) -> ApiResult<Json<PaymentIntentResponse>> {
    if !request.price.is_finite() || request.price <= 0.0 {
        return Err(ApiError::bad_request("price must be a positive number"));
    }

    let amount = (request.price * 100.0).round() as i64;
    let intent = state.payment_provider.create_intent(amount, "usd").await?;

    tracing::debug!(amount, intent_id = %intent.id, "payment intent created");

    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

// =============================================================================
// Payment recording
// =============================================================================

/// Request body for recording a settled payment.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    /// Paying user's email; must match the caller.
    pub email: String,
    /// Total price in major currency units.
    pub price: f64,
    /// Provider transaction id.
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    /// Cart lines settled by this payment.
    #[serde(rename = "cartIds")]
    pub cart_ids: Vec<RecordId>,
    /// Menu items covered by this payment.
    #[serde(rename = "menuItemIds")]
    pub menu_item_ids: Vec<RecordId>,
}

/// POST /api/payment  (authenticated, owner only)
///
/// Records a payment and removes the cart lines it settled.
pub async fn record_payment(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<RecordPaymentRequest>,
) -> ApiResult<Json<PaymentRecordedResponse>> {
    // Payments are written under the caller's identity only.
    ctx.ensure_owns(&request.email)?;

    let inserted_id = state
        .payment_store
        .insert(NewPayment {
            email: request.email,
            price: request.price,
            transaction_id: request.transaction_id,
            cart_ids: request.cart_ids.clone(),
            menu_item_ids: request.menu_item_ids,
            status: PaymentStatus::Pending,
        })
        .await?;

    let deleted = state.cart_store.delete_many(&request.cart_ids).await?;

    tracing::info!(
        payment_id = %inserted_id,
        cart_lines = deleted.deleted_count,
        "payment recorded"
    );

    Ok(Json(PaymentRecordedResponse {
        inserted_id,
        deleted_count: deleted.deleted_count,
    }))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthContext, Claims, JwtConfig};
    use crate::config::ApiConfig;
    use bistro_core::{CartStore, MemoryStore, NewCartItem};
    use std::sync::Arc;

    fn state() -> (Arc<MemoryStore>, AppState) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::builder()
            .config(ApiConfig::default().with_jwt(JwtConfig::new(
                "test-secret-key-that-is-long-enough",
            )))
            .memory_store(store.clone())
            .build()
            .unwrap();
        (store, state)
    }

    fn ctx(email: &str) -> Auth {
        Auth(AuthContext::from_claims(&Claims::new(email, 3600)))
    }

    #[tokio::test]
    async fn test_intent_for_positive_price() {
        let (_store, state) = state();

        let Json(body) = create_payment_intent(
            State(state),
            ctx("ada@example.com"),
            Json(PaymentIntentRequest { price: 12.5 }),
        )
        .await
        .unwrap();
        assert!(body.client_secret.contains("_secret_"));
    }

    #[tokio::test]
    async fn test_intent_rejects_non_positive_price() {
        let (_store, state) = state();

        let err = create_payment_intent(
            State(state),
            ctx("ada@example.com"),
            Json(PaymentIntentRequest { price: 0.0 }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_record_payment_clears_named_cart_lines() {
        let (store, state) = state();

        let cart_id = CartStore::insert(
            store.as_ref(),
            NewCartItem {
                email: "ada@example.com".to_string(),
                menu_item_id: RecordId::generate(),
                name: "Margherita".to_string(),
                image: String::new(),
                price: 10.0,
            },
        )
        .await
        .unwrap();

        let Json(body) = record_payment(
            State(state),
            ctx("ada@example.com"),
            Json(RecordPaymentRequest {
                email: "ada@example.com".to_string(),
                price: 10.0,
                transaction_id: "tx-1".to_string(),
                cart_ids: vec![cart_id],
                menu_item_ids: vec![],
            }),
        )
        .await
        .unwrap();

        assert_eq!(body.deleted_count, 1);
        assert!(CartStore::list_by_email(store.as_ref(), "ada@example.com")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_history_requires_ownership() {
        let (_store, state) = state();

        let err = payment_history(
            State(state),
            ctx("eve@example.com"),
            Path("ada@example.com".to_string()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_recording_for_other_identity_forbidden() {
        let (_store, state) = state();

        let err = record_payment(
            State(state),
            ctx("eve@example.com"),
            Json(RecordPaymentRequest {
                email: "ada@example.com".to_string(),
                price: 10.0,
                transaction_id: "tx-1".to_string(),
                cart_ids: vec![],
                menu_item_ids: vec![],
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }
}
