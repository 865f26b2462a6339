// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Identity-record handlers.

use axum::{
    extract::{Path, State},
    Json,
};

use bistro_core::{DeleteResult, InsertOutcome, NewUser, RecordId, UpdateResult, User};

use crate::error::{ApiError, ApiResult};
use crate::extractors::Auth;
use crate::response::{AdminStatusResponse, InsertResponse};
use crate::state::AppState;

/// POST /api/user
///
/// Registers a user. Registration is idempotent on the unique email key: a
/// duplicate registration is acknowledged with the `user already exists`
/// sentinel instead of an error, and writes nothing.
pub async fn register_user(
    State(state): State<AppState>,
    Json(user): Json<NewUser>,
) -> ApiResult<Json<InsertResponse>> {
    if user.email.is_empty() {
        return Err(ApiError::bad_request("email is required"));
    }

    match state.user_store.insert(user).await? {
        InsertOutcome::Created(id) => Ok(Json(InsertResponse::created(id))),
        InsertOutcome::AlreadyExists => Ok(Json(InsertResponse::already_exists())),
    }
}

/// GET /api/user  (admin)
///
/// Lists all identity records.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.user_store.list().await?;
    Ok(Json(users))
}

/// GET /api/user/admin/{id}  (authenticated, owner only)
///
/// Reports whether the queried email carries the administrator role. The
/// path segment is the target email; a caller may only query their own
/// status, whatever their role. A missing record reports `false`.
pub async fn admin_status(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(email): Path<String>,
) -> ApiResult<Json<AdminStatusResponse>> {
    ctx.ensure_owns(&email)?;

    let admin = state.role_resolver.is_admin(&email).await?;
    Ok(Json(AdminStatusResponse { admin }))
}

/// PATCH /api/user/admin/{id}  (admin)
///
/// Promotes the identity record to the administrator role.
pub async fn promote_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UpdateResult>> {
    let id = parse_record_id(&id)?;
    let result = state.user_store.promote_to_admin(&id).await?;

    if result.matched_count == 0 {
        return Err(ApiError::not_found("user"));
    }

    tracing::info!(user_id = %id, "user promoted to admin");
    Ok(Json(result))
}

/// DELETE /api/user/{id}  (admin)
///
/// Deletes an identity record.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResult>> {
    let id = parse_record_id(&id)?;
    let result = state.user_store.delete(&id).await?;
    Ok(Json(result))
}

fn parse_record_id(raw: &str) -> ApiResult<RecordId> {
    RecordId::parse(raw).ok_or_else(|| ApiError::bad_request(format!("invalid record id '{raw}'")))
}

// =============================================================================
// Tests
// =============================================================================
