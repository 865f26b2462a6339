// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! JWT claims structure.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in an issued credential.
///
/// The subject is the caller's email; the stored role is deliberately not
/// part of the claims, it is resolved from the identity record store on each
/// privileged request so that a promotion or demotion takes effect without
/// re-issuing tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the caller's email.
    pub sub: String,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at time (Unix timestamp).
    pub iat: i64,

    /// Token id; makes two same-second issuances distinct strings.
    pub jti: String,

    /// Caller's display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Claims {
    /// Creates claims for an email, expiring `expires_in_secs` from now.
    pub fn new(email: impl Into<String>, expires_in_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: email.into(),
            exp: now + expires_in_secs,
            iat: now,
            jti: Uuid::now_v7().to_string(),
            name: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the caller's email.
    pub fn email(&self) -> &str {
        &self.sub
    }

    /// Returns `true` if the claims have expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new("ada@example.com", 3600);

        assert_eq!(claims.email(), "ada@example.com");
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_same_second_claims_are_distinct() {
        let a = Claims::new("ada@example.com", 3600);
        let b = Claims::new("ada@example.com", 3600);

        assert_ne!(a.jti, b.jti);
        assert_eq!(a.sub, b.sub);
    }

    #[test]
    fn test_expired_claims() {
        let claims = Claims::new("ada@example.com", -60);
        assert!(claims.is_expired());
    }
}
