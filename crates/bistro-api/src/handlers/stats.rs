// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Admin aggregate handlers.
//!
//! Both routes are one pass-through each to the store's aggregation
//! operations; the numbers' business semantics live in the store.

use axum::{extract::State, Json};

use bistro_core::{AdminStats, CategoryStat};

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/admin-stats  (admin)
///
/// Headline counters for the admin dashboard.
pub async fn admin_stats(State(state): State<AppState>) -> ApiResult<Json<AdminStats>> {
    let stats = state.stats_store.admin_stats().await?;
    Ok(Json(stats))
}

/// GET /api/order-stats  (admin)
///
/// Per-category order quantities and revenue.
pub async fn order_stats(State(state): State<AppState>) -> ApiResult<Json<Vec<CategoryStat>>> {
    let stats = state.stats_store.order_stats().await?;
    Ok(Json(stats))
}
