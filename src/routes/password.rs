// ABOUTME: Password reset route handlers
// ABOUTME: Forgot-password request and password reset with mocked delivery
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! Password reset routes.
//!
//! Delivery is mocked: the forgot endpoint acknowledges without sending
//! anything, and the reset endpoint accepts the email directly instead of
//! a mailed token.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use super::MessageResponse;
use crate::context::ServerResources;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::models::normalize_email;

/// Forgot-password request
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Password reset request
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
}

/// Password routes
pub fn routes() -> Router<Arc<ServerResources>> {
    Router::new()
        .route("/forgot", post(forgot_handler))
        .route("/reset", post(reset_handler))
}

async fn forgot_handler(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<ForgotPasswordRequest>,
) -> AppResult<impl IntoResponse> {
    let email = normalize_email(&request.email);
    resources
        .database
        .get_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    info!("password reset requested for {email}");
    Ok(Json(MessageResponse::new(
        "Password reset instructions sent (mock).",
    )))
}

async fn reset_handler(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<ResetPasswordRequest>,
) -> AppResult<impl IntoResponse> {
    if request.new_password.len() < 8 {
        return Err(AppError::validation(
            "Password must be at least 8 characters",
        ));
    }

    let email = normalize_email(&request.email);
    let mut user = resources
        .database
        .get_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    user.password_hash = bcrypt::hash(&request.new_password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))?;
    user.updated_at = Utc::now();
    resources.database.save_user(&user).await?;

    info!("password reset completed for {email}");
    Ok(Json(MessageResponse::new("Password reset successful.")))
}
