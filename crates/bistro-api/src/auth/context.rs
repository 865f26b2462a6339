// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Request-scoped authentication context.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Claims;
use crate::error::{ApiError, ApiResult};

/// Decoded request identity.
///
/// Built from cryptographically verified claims by the authentication gate
/// and attached to request extensions for the lifetime of that request only.
/// Downstream gates and handlers trust the email in here; they never read the
/// caller identity from the request body or query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Verified caller email.
    pub email: String,
    /// Caller display name, when the credential carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Request id for tracing.
    pub request_id: Uuid,
    /// Client IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<IpAddr>,
}

impl AuthContext {
    /// Creates a context from verified claims.
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            email: claims.sub.clone(),
            name: claims.name.clone(),
            request_id: Uuid::now_v7(),
            client_ip: None,
        }
    }

    /// Sets the client IP address.
    pub fn with_client_ip(mut self, ip: IpAddr) -> Self {
        self.client_ip = Some(ip);
        self
    }

    /// Sets the request id.
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// Resource ownership check.
    ///
    /// Routes that take a target email may only serve the caller's own data:
    /// a mismatch is a 403 regardless of the caller's role.
    pub fn ensure_owns(&self, email: &str) -> ApiResult<()> {
        if self.email == email {
            Ok(())
        } else {
            Err(ApiError::forbidden(format!(
                "caller {} requested resources of {}",
                self.email, email
            )))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
