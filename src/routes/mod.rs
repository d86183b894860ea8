// ABOUTME: HTTP route assembly for the Savora API
// ABOUTME: Nests the per-domain routers and applies trace and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! HTTP routes
//!
//! Thin transport wrappers over the service layer, mapped 1:1 to the API
//! surface. Handlers validate transport-level input, delegate to services,
//! and shape the JSON response.

use std::sync::Arc;

use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::context::ServerResources;

pub mod auth;
pub mod health;
pub mod password;
pub mod recipes;
pub mod users;

/// Minimal mutation acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Assemble the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(health::routes())
        .nest("/api/auth", auth::routes())
        .nest("/api/recipes", recipes::routes())
        .nest("/api/users", users::routes())
        .nest("/api/password", password::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(resources)
}
