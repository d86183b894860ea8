// ABOUTME: JWT-based user authentication for the Savora API
// ABOUTME: Handles token generation and validation with detailed failure mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! # Authentication
//!
//! HS256 JWT issuance and validation. Password hashing itself lives at the
//! signup/login boundary (bcrypt); this module only deals in signed tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::User;

/// JWT claims for user authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Expiration timestamp (seconds)
    pub exp: i64,
}

/// Generate a random JWT secret, hex-encoded.
///
/// Used when no `JWT_SECRET` is configured outside production; tokens signed
/// with an ephemeral secret do not survive a restart.
#[must_use]
pub fn generate_jwt_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Token issuance and validation
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
}

impl AuthManager {
    /// Create a manager signing with `secret` and issuing tokens valid for
    /// `expiry_hours`
    #[must_use]
    pub fn new(secret: &[u8], expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiry_hours,
        }
    }

    /// When a token issued now will expire
    #[must_use]
    pub fn token_expiry(&self) -> chrono::DateTime<Utc> {
        Utc::now() + Duration::hours(self.expiry_hours)
    }

    /// Generate a token for `user`
    ///
    /// # Errors
    /// Returns an internal error if signing fails.
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("failed to sign token: {e}")))
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    /// Returns an auth error distinguishing expired, malformed, and
    /// invalid-signature tokens.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AppError::auth_expired(),
                    ErrorKind::InvalidToken => AppError::new(
                        crate::errors::ErrorCode::AuthMalformed,
                        "Token is malformed",
                    ),
                    _ => AppError::auth_invalid("Token signature is invalid"),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::errors::ErrorCode;

    fn test_user() -> User {
        User::new("Test User".into(), "test@example.com", "hash".into())
    }

    #[test]
    fn test_generate_and_validate_token() {
        let manager = AuthManager::new(b"test-secret", 24);
        let user = test_user();

        let token = manager.generate_token(&user).unwrap();
        assert!(!token.is_empty());

        let claims = manager.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, "test@example.com");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative expiry puts `exp` well past the default leeway.
        let manager = AuthManager::new(b"test-secret", -2);
        let token = manager.generate_token(&test_user()).unwrap();

        let err = manager.validate_token(&token).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthExpired);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = AuthManager::new(b"secret-a", 24);
        let token = manager.generate_token(&test_user()).unwrap();

        let other = AuthManager::new(b"secret-b", 24);
        let err = other.validate_token(&token).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthInvalid);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let manager = AuthManager::new(b"test-secret", 24);
        assert!(manager.validate_token("not-a-token").is_err());
    }
}
