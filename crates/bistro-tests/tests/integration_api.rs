// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! End-to-end tests for the authorization layer.
//!
//! Each test drives the assembled router the way a client would and asserts
//! on status codes and wire bodies:
//!
//! - `test_auth_*`: authentication gate behavior
//! - `test_admin_*`: authorization gate behavior
//! - `test_owner_*`: resource ownership checks
//! - `test_register_*`: idempotent registration
//! - `test_promotion_*`: end-to-end role promotion
//! - `test_payment_*` / `test_stats_*`: gated collaborator routes

use axum::http::{Method, StatusCode};
use serde_json::json;
use std::sync::Arc;

use bistro_core::{Role, UserStore};
use bistro_tests::common::{fixtures::assert_role, FlakyUserStore, TestBackend};

// =============================================================================
// Authentication gate
// =============================================================================

#[tokio::test]
async fn test_auth_missing_header_is_401() {
    let backend = TestBackend::new();

    for path in ["/api/user", "/api/carts?email=a@example.com", "/api/payment/a@example.com"] {
        let (status, body) = backend.get(path, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "path {path}");
        assert_eq!(body["message"], "Unauthorized access", "path {path}");
    }
}

#[tokio::test]
async fn test_auth_foreign_secret_is_401() {
    let backend = TestBackend::new();
    let token = backend.foreign_token_for("ada@example.com");

    let (status, body) = backend
        .get("/api/payment/ada@example.com", Some(&token))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized access");
}

#[tokio::test]
async fn test_auth_expired_token_is_401() {
    let backend = TestBackend::new();
    let token = backend.expired_token_for("ada@example.com");

    let (status, _) = backend
        .get("/api/payment/ada@example.com", Some(&token))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_garbage_token_is_401() {
    let backend = TestBackend::new();

    let (status, _) = backend.get("/api/user", Some("not.a.token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_public_routes_need_no_credential() {
    let backend = TestBackend::new();

    for path in ["/", "/health", "/api/menu", "/api/reviews"] {
        let (status, _) = backend.get(path, None).await;
        assert_eq!(status, StatusCode::OK, "path {path}");
    }
}

#[tokio::test]
async fn test_auth_two_issuances_differ_but_both_work() {
    let backend = TestBackend::new();
    backend.seed_user("Ada", "ada@example.com", Role::Admin);

    let a = backend.token_for("ada@example.com");
    let b = backend.token_for("ada@example.com");
    assert_ne!(a, b);

    for token in [a, b] {
        let (status, _) = backend.get("/api/user", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
    }
}

// =============================================================================
// Authorization gate
// =============================================================================

#[tokio::test]
async fn test_admin_route_rejects_default_role() {
    let backend = TestBackend::new();
    backend.seed_user("Bob", "bob@example.com", Role::Default);
    let token = backend.token_for("bob@example.com");

    let (status, body) = backend.get("/api/user", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden access");
}

#[tokio::test]
async fn test_admin_route_rejects_unregistered_caller() {
    let backend = TestBackend::new();
    let token = backend.token_for("ghost@example.com");

    // Valid credential, but no identity record: treated as non-admin.
    let (status, body) = backend.get("/api/user", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden access");
}

#[tokio::test]
async fn test_admin_route_allows_admin() {
    let backend = TestBackend::new();
    backend.seed_user("Ada", "ada@example.com", Role::Admin);
    let token = backend.token_for("ada@example.com");

    let (status, body) = backend.get("/api/user", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());
}

#[tokio::test]
async fn test_admin_gate_applies_to_menu_mutations() {
    let backend = TestBackend::new();
    backend.seed_user("Bob", "bob@example.com", Role::Default);
    let token = backend.token_for("bob@example.com");

    let item = json!({
        "name": "Margherita",
        "recipe": "tomato, mozzarella, basil",
        "image": "",
        "category": "pizza",
        "price": 10.0
    });

    let (status, _) = backend.post("/api/menu", Some(&token), item.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Without a credential the same route is a 401, not a 403.
    let (status, _) = backend.post("/api/menu", None, item).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_store_failure_is_503_not_403() {
    let store = Arc::new(bistro_core::MemoryStore::new());
    store.seed_user("Ada", "ada@example.com", Role::Admin);
    let flaky = Arc::new(FlakyUserStore::new(store));

    let backend = {
        let flaky = flaky.clone();
        TestBackend::with_state(move |builder| builder.user_store(flaky))
    };
    let token = backend.token_for("ada@example.com");

    flaky.fail_next();
    let (status, _) = backend.get("/api/user", Some(&token)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    // Exactly one lookup per gated request.
    assert_eq!(flaky.lookup_count(), 1);

    // The next request succeeds again.
    let (status, _) = backend.get("/api/user", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Resource ownership
// =============================================================================

#[tokio::test]
async fn test_owner_admin_status_for_own_email() {
    let backend = TestBackend::new();
    backend.seed_user("Ada", "ada@example.com", Role::Admin);
    let token = backend.token_for("ada@example.com");

    let (status, body) = backend
        .get("/api/user/admin/ada@example.com", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admin"], true);
}

#[tokio::test]
async fn test_owner_admin_status_unregistered_is_false() {
    let backend = TestBackend::new();
    let token = backend.token_for("ghost@example.com");

    let (status, body) = backend
        .get("/api/user/admin/ghost@example.com", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admin"], false);
}

#[tokio::test]
async fn test_owner_mismatch_is_403_even_for_admin() {
    let backend = TestBackend::new();
    backend.seed_user("Ada", "ada@example.com", Role::Admin);
    let token = backend.token_for("ada@example.com");

    let (status, body) = backend
        .get("/api/user/admin/bob@example.com", Some(&token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden access");

    let (status, _) = backend
        .get("/api/payment/bob@example.com", Some(&token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_cart_listing_scoped_to_caller() {
    let backend = TestBackend::new();
    let token = backend.token_for("ada@example.com");

    let (status, _) = backend
        .get("/api/carts?email=ada@example.com", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = backend
        .get("/api/carts?email=bob@example.com", Some(&token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_twice_returns_sentinel_and_writes_once() {
    let backend = TestBackend::new();
    let payload = json!({ "name": "Ada", "email": "ada@example.com" });

    let (status, body) = backend.post("/api/user", None, payload.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["insertedId"].is_string());

    let (status, body) = backend.post("/api/user", None, payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "user already exists");
    assert!(body["insertedId"].is_null());

    assert_eq!(
        UserStore::list(backend.store.as_ref()).await.unwrap().len(),
        1
    );
}

// =============================================================================
// Promotion end-to-end
// =============================================================================

#[tokio::test]
async fn test_promotion_by_admin_succeeds() {
    let backend = TestBackend::new();
    backend.seed_user("Admin", "admin@example.com", Role::Admin);
    let bob = backend.seed_user("Bob", "bob@example.com", Role::Default);
    let token = backend.token_for("admin@example.com");

    let (status, body) = backend
        .request(
            Method::PATCH,
            &format!("/api/user/admin/{bob}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedCount"], 1);
    assert_eq!(body["modifiedCount"], 1);

    assert_role(&backend.store, "bob@example.com", true).await;
}

#[tokio::test]
async fn test_promotion_by_default_caller_is_403() {
    let backend = TestBackend::new();
    backend.seed_user("Bob", "bob@example.com", Role::Default);
    let eve = backend.seed_user("Eve", "eve@example.com", Role::Default);
    let token = backend.token_for("bob@example.com");

    let (status, body) = backend
        .request(
            Method::PATCH,
            &format!("/api/user/admin/{eve}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden access");

    assert_role(&backend.store, "eve@example.com", false).await;
}

#[tokio::test]
async fn test_delete_user_is_admin_gated() {
    let backend = TestBackend::new();
    backend.seed_user("Bob", "bob@example.com", Role::Default);
    let target = backend.seed_user("Eve", "eve@example.com", Role::Default);
    let token = backend.token_for("bob@example.com");

    let (status, _) = backend
        .request(
            Method::DELETE,
            &format!("/api/user/{target}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Payments
// =============================================================================

#[tokio::test]
async fn test_payment_intent_returns_client_secret() {
    let backend = TestBackend::new();
    let token = backend.token_for("ada@example.com");

    let (status, body) = backend
        .post("/api/payment-intent", Some(&token), json!({ "price": 12.5 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["clientSecret"].as_str().unwrap().contains("_secret_"));
}

#[tokio::test]
async fn test_payment_intent_requires_credential() {
    let backend = TestBackend::new();

    let (status, _) = backend
        .post("/api/payment-intent", None, json!({ "price": 12.5 }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_payment_record_clears_cart_and_lists_history() {
    let backend = TestBackend::new();
    let token = backend.token_for("ada@example.com");

    // Put a line in the cart over HTTP.
    let menu_id = backend.store.seed_menu_item("Margherita", "pizza", 10.0);
    let (status, body) = backend
        .post(
            "/api/carts",
            Some(&token),
            json!({
                "email": "ada@example.com",
                "menuItemId": menu_id.to_string(),
                "name": "Margherita",
                "image": "",
                "price": 10.0
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let cart_id = body["insertedId"].as_str().unwrap().to_string();

    // Record the payment settling that line.
    let (status, body) = backend
        .post(
            "/api/payment",
            Some(&token),
            json!({
                "email": "ada@example.com",
                "price": 10.0,
                "transactionId": "tx-1",
                "cartIds": [cart_id],
                "menuItemIds": [menu_id.to_string()]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 1);

    // Cart is empty, history has one entry.
    let (_, carts) = backend
        .get("/api/carts?email=ada@example.com", Some(&token))
        .await;
    assert_eq!(carts.as_array().unwrap().len(), 0);

    let (status, history) = backend
        .get("/api/payment/ada@example.com", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["transactionId"], "tx-1");
}

// =============================================================================
// Stats
// =============================================================================

#[tokio::test]
async fn test_stats_routes_are_admin_gated() {
    let backend = TestBackend::new();
    backend.seed_user("Ada", "ada@example.com", Role::Admin);
    backend.seed_user("Bob", "bob@example.com", Role::Default);

    let admin_token = backend.token_for("ada@example.com");
    let user_token = backend.token_for("bob@example.com");

    for path in ["/api/admin-stats", "/api/order-stats"] {
        let (status, _) = backend.get(path, Some(&user_token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "path {path}");

        let (status, _) = backend.get(path, Some(&admin_token)).await;
        assert_eq!(status, StatusCode::OK, "path {path}");
    }
}

#[tokio::test]
async fn test_stats_counts_reflect_store() {
    let backend = TestBackend::new();
    backend.seed_user("Ada", "ada@example.com", Role::Admin);
    backend.store.seed_menu_item("Margherita", "pizza", 10.0);
    backend.store.seed_menu_item("Caesar", "salad", 6.0);

    let token = backend.token_for("ada@example.com");
    let (status, body) = backend.get("/api/admin-stats", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"], 1);
    assert_eq!(body["menuItems"], 2);
    assert_eq!(body["orders"], 0);
}
