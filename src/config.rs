// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into a typed server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! Environment-based configuration.
//!
//! Configuration is environment-only; there is no config file. The JWT
//! secret is required in production and generated (with a warning) in
//! development, where an ephemeral secret merely means sessions do not
//! survive a restart.

use anyhow::{Context, Result};
use std::env;
use tracing::warn;

use crate::auth::generate_jwt_secret;

/// Environment type for security-sensitive defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Store connection string
    pub database_url: String,
    /// JWT signing secret
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
    /// Deployment environment
    pub environment: Environment,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error for unparseable numeric values, or when
    /// `JWT_SECRET` is missing in production.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_default(),
        );

        let http_port = match env::var("HTTP_PORT") {
            Ok(raw) => raw.parse().context("HTTP_PORT must be a valid port number")?,
            Err(_) => 5000,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:savora.db".to_owned());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if environment.is_production() => {
                anyhow::bail!("JWT_SECRET must be set in production")
            }
            _ => {
                warn!("JWT_SECRET not set; using an ephemeral secret (sessions reset on restart)");
                generate_jwt_secret()
            }
        };

        let jwt_expiry_hours = match env::var("JWT_EXPIRY_HOURS") {
            Ok(raw) => raw
                .parse()
                .context("JWT_EXPIRY_HOURS must be a whole number of hours")?,
            Err(_) => 24,
        };

        Ok(Self {
            http_port,
            database_url,
            jwt_secret,
            jwt_expiry_hours,
            environment,
        })
    }

    /// One-line startup summary for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} http_port={} database={} jwt_expiry_hours={}",
            self.environment, self.http_port, self.database_url, self.jwt_expiry_hours
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_str_or_default() {
        assert_eq!(
            Environment::from_str_or_default("production"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("test"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("anything"),
            Environment::Development
        );
        assert_eq!(Environment::from_str_or_default(""), Environment::Development);
    }
}
