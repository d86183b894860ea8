// ABOUTME: Dependency-injection container for request handling
// ABOUTME: Bundles the store adapter, auth manager, and configuration as axum state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! Shared server resources.
//!
//! Every handler and service receives its collaborators through this
//! container; there is no ambient global store connection.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database_plugins::factory::Database;

/// The dependency container handed to the router as axum state
pub struct ServerResources {
    /// Store adapter
    pub database: Arc<Database>,
    /// Token issuance and validation
    pub auth: Arc<AuthManager>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle the server's long-lived resources
    #[must_use]
    pub fn new(database: Database, auth: AuthManager, config: ServerConfig) -> Self {
        Self {
            database: Arc::new(database),
            auth: Arc::new(auth),
            config: Arc::new(config),
        }
    }
}
