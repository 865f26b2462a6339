// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Credential issuance handler.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::response::TokenResponse;
use crate::state::AppState;

/// Claims payload supplied by the client when requesting a credential.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenRequest {
    /// Caller email; becomes the credential subject.
    pub email: String,
    /// Caller display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// POST /jwt
///
/// Issues a signed, time-limited credential from the supplied claims payload.
/// The payload must carry an email; everything else about the caller is
/// resolved from the record store when the credential is later presented.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    if request.email.is_empty() {
        return Err(ApiError::bad_request("email is required"));
    }

    let token = state.jwt().issue(&request.email, request.name)?;

    tracing::debug!(email = %request.email, "credential issued");

    Ok(Json(TokenResponse { token }))
}
