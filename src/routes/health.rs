// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Provides health and readiness endpoints for load balancers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! Health check routes for service monitoring.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};

use crate::context::ServerResources;

/// Health routes
pub fn routes() -> Router<Arc<ServerResources>> {
    async fn health_handler() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn ready_handler() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "ready",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
}
