// ABOUTME: Main library entry point for the Savora recipe API
// ABOUTME: Exposes the service, store, auth, and transport modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

#![deny(unsafe_code)]

//! # Savora
//!
//! A recipe-sharing API backend: authentication, recipe CRUD,
//! search/filtering, likes, view counters, and a five-star rating system.
//!
//! ## Architecture
//!
//! - **Models**: recipe and user documents, plus the aggregate-maintenance
//!   rules (rating mean/count, cached like counter)
//! - **Store**: `DatabaseProvider` trait with a SQLite backend behind a
//!   factory enum
//! - **Services**: protocol-agnostic business logic (ratings, engagement,
//!   recipes, profiles) with the store injected at construction
//! - **Routes**: thin axum handlers mapping the HTTP surface onto services
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use savora::config::ServerConfig;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! println!("Savora configured for port {}", config.http_port);
//! # Ok(())
//! # }
//! ```

/// JWT issuance and validation
pub mod auth;

/// Environment-based configuration
pub mod config;

/// Dependency-injection container shared across handlers
pub mod context;

/// Store abstraction layer with plugin support
pub mod database_plugins;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// Request authentication middleware
pub mod middleware;

/// Core data models and aggregate-maintenance rules
pub mod models;

/// Offset pagination for listing endpoints
pub mod pagination;

/// HTTP routes
pub mod routes;

/// Domain service layer
pub mod services;
