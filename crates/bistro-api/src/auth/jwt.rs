// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! JWT credential issuance and verification.

use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::Claims;
use crate::error::{ApiError, ApiResult};

// =============================================================================
// JwtConfig
// =============================================================================

/// JWT configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Process-wide signing secret.
    #[serde(skip_serializing)]
    pub secret: String,
    /// Credential lifetime in seconds.
    pub token_ttl_secs: i64,
    /// Clock skew tolerance in seconds.
    pub leeway_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(), // must be provided by configuration
            token_ttl_secs: 3600,  // 1 hour
            leeway_secs: 30,
        }
    }
}

impl JwtConfig {
    /// Creates a configuration with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Sets the credential lifetime.
    pub fn with_token_ttl(mut self, secs: i64) -> Self {
        self.token_ttl_secs = secs;
        self
    }

    /// Validates the configuration.
    ///
    /// A missing secret is a configuration fault surfaced at startup.
    pub fn validate(&self) -> ApiResult<()> {
        if self.secret.is_empty() {
            return Err(ApiError::internal("JWT signing secret is not configured"));
        }
        if self.secret.len() < 32 {
            tracing::warn!("JWT secret is shorter than recommended (32 bytes)");
        }
        Ok(())
    }
}

// =============================================================================
// JwtManager
// =============================================================================

/// Issues and verifies signed credentials.
///
/// Constructed once at startup from the process-wide secret and shared
/// read-only across requests.
#[derive(Clone)]
pub struct JwtManager {
    config: Arc<JwtConfig>,
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl JwtManager {
    /// Creates a manager, failing if the secret is missing.
    pub fn new(config: JwtConfig) -> ApiResult<Self> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        validation.validate_aud = false;

        Ok(Self {
            config: Arc::new(config),
            encoding_key: Arc::new(encoding_key),
            decoding_key: Arc::new(decoding_key),
            validation: Arc::new(validation),
        })
    }

    /// Signs the given claims into a credential.
    pub fn sign(&self, claims: &Claims) -> ApiResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("failed to sign credential: {e}")))
    }

    /// Issues a credential for an email with the configured lifetime.
    pub fn issue(&self, email: &str, name: Option<String>) -> ApiResult<String> {
        let mut claims = Claims::new(email, self.config.token_ttl_secs);
        if let Some(name) = name {
            claims = claims.with_name(name);
        }
        self.sign(&claims)
    }

    /// Verifies a credential and returns its claims.
    ///
    /// Bad signature, expiry and malformed input all collapse to 401; the
    /// distinction is kept in the logged detail only.
    pub fn verify(&self, token: &str) -> ApiResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                let detail = match e.kind() {
                    ErrorKind::ExpiredSignature => "credential expired".to_string(),
                    ErrorKind::InvalidSignature => "invalid signature".to_string(),
                    ErrorKind::InvalidToken => "malformed credential".to_string(),
                    _ => format!("credential verification failed: {e}"),
                };
                ApiError::unauthorized(detail)
            })
    }

    /// Returns the configured credential lifetime in seconds.
    pub fn token_ttl_secs(&self) -> i64 {
        self.config.token_ttl_secs
    }
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("token_ttl_secs", &self.config.token_ttl_secs)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
