// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Menu catalog handlers.

use axum::{
    extract::{Path, State},
    Json,
};

use bistro_core::{DeleteResult, MenuItem, NewMenuItem, RecordId};

use crate::error::{ApiError, ApiResult};
use crate::response::InsertResponse;
use crate::state::AppState;

/// GET /api/menu
///
/// Lists the full menu. Public.
pub async fn list_menu(State(state): State<AppState>) -> ApiResult<Json<Vec<MenuItem>>> {
    let menu = state.menu_store.list().await?;
    Ok(Json(menu))
}

/// POST /api/menu  (admin)
///
/// Adds a menu item.
pub async fn add_menu_item(
    State(state): State<AppState>,
    Json(item): Json<NewMenuItem>,
) -> ApiResult<Json<InsertResponse>> {
    if item.name.is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }

    let id = state.menu_store.insert(item).await?;
    Ok(Json(InsertResponse::created(id)))
}

/// DELETE /api/menu/{id}  (admin)
///
/// Removes a menu item.
pub async fn remove_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResult>> {
    let id = RecordId::parse(&id)
        .ok_or_else(|| ApiError::bad_request(format!("invalid record id '{id}'")))?;
    let result = state.menu_store.delete(&id).await?;
    Ok(Json(result))
}
