// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Cart handlers.
//!
//! Cart lines are scoped to the owning email; listing requires the ownership
//! check, mutation requires authentication.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use bistro_core::{CartItem, DeleteResult, NewCartItem, RecordId};

use crate::error::{ApiError, ApiResult};
use crate::extractors::Auth;
use crate::response::InsertResponse;
use crate::state::AppState;

/// Query parameters for cart listing.
#[derive(Debug, Deserialize)]
pub struct CartQuery {
    /// Owning email whose cart to list.
    pub email: String,
}

/// GET /api/carts?email=  (authenticated, owner only)
///
/// Lists the cart lines owned by the given email.
pub async fn list_cart(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Query(query): Query<CartQuery>,
) -> ApiResult<Json<Vec<CartItem>>> {
    ctx.ensure_owns(&query.email)?;

    let items = state.cart_store.list_by_email(&query.email).await?;
    Ok(Json(items))
}

/// POST /api/carts  (authenticated)
///
/// Adds a cart line for the caller.
pub async fn add_cart_item(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(item): Json<NewCartItem>,
) -> ApiResult<Json<InsertResponse>> {
    // Cart lines are written under the caller's identity only.
    ctx.ensure_owns(&item.email)?;

    let id = state.cart_store.insert(item).await?;
    Ok(Json(InsertResponse::created(id)))
}

/// DELETE /api/carts/{id}  (authenticated)
///
/// Removes a cart line.
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResult>> {
    let id = RecordId::parse(&id)
        .ok_or_else(|| ApiError::bad_request(format!("invalid record id '{id}'")))?;
    let result = state.cart_store.delete(&id).await?;
    Ok(Json(result))
}
