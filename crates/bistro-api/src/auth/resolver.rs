// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Role resolution against the identity record store.

use std::sync::Arc;

use bistro_core::UserStore;

use crate::error::ApiResult;

/// Resolves a caller's stored role by email.
///
/// The store is injected explicitly; the resolver is the only point where the
/// authorization layer touches it, and each call is exactly one lookup on the
/// unique email key. A missing record resolves to non-admin — an unregistered
/// caller is a normal negative, not a fault.
#[derive(Clone)]
pub struct RoleResolver {
    store: Arc<dyn UserStore>,
}

impl RoleResolver {
    /// Creates a resolver over the given store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Returns `true` if the identity record for `email` carries the
    /// administrator role.
    pub async fn is_admin(&self, email: &str) -> ApiResult<bool> {
        let user = self.store.find_by_email(email).await?;
        Ok(user.map(|u| u.is_admin()).unwrap_or(false))
    }
}

impl std::fmt::Debug for RoleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleResolver").finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
