// ABOUTME: User authentication route handlers for signup and login
// ABOUTME: Validates credentials, hashes passwords, and issues JWTs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! Authentication routes.
//!
//! Unknown email and wrong password produce the same invalid-credentials
//! error so login failures reveal nothing about account existence.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::context::ServerResources;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::models::{is_valid_email, normalize_email, User};

/// Minimum accepted password length
const MIN_PASSWORD_LENGTH: usize = 8;

/// User registration request
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// User registration response
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user_id: String,
    pub message: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User info for login response
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub user_id: String,
    pub full_name: String,
    pub email: String,
}

/// User login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub jwt_token: String,
    pub expires_at: String,
    pub user: UserInfo,
}

/// Authentication routes
pub fn routes() -> Router<Arc<ServerResources>> {
    Router::new()
        .route("/signup", post(signup_handler))
        .route("/login", post(login_handler))
}

async fn signup_handler(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    info!("signup attempt for email: {}", request.email);

    if request.full_name.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
    {
        return Err(AppError::missing_field("All fields are required."));
    }
    if !is_valid_email(&request.email) {
        return Err(AppError::validation("Invalid email format"));
    }
    if request.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let email = normalize_email(&request.email);
    if resources.database.get_user_by_email(&email).await?.is_some() {
        return Err(AppError::conflict("User already exists."));
    }

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))?;
    let user = User::new(request.full_name.trim().to_owned(), &email, password_hash);
    let user_id = resources.database.create_user(&user).await?;

    info!("user registered: {} ({})", user.email, user_id);

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user_id: user_id.to_string(),
            message: "User registered successfully.".to_owned(),
        }),
    ))
}

async fn login_handler(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    info!("login attempt for email: {}", request.email);

    let email = normalize_email(&request.email);
    let user = resources
        .database
        .get_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::auth_invalid("Invalid credentials."))?;

    // Verify on a blocking thread; bcrypt is deliberately slow.
    let password = request.password;
    let password_hash = user.password_hash.clone();
    let is_valid = tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
        .await
        .map_err(|e| AppError::internal(format!("password verification task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("password verification error: {e}")))?;

    if !is_valid {
        return Err(AppError::auth_invalid("Invalid credentials."));
    }

    let jwt_token = resources.auth.generate_token(&user)?;

    Ok(Json(LoginResponse {
        jwt_token,
        expires_at: resources.auth.token_expiry().to_rfc3339(),
        user: UserInfo {
            user_id: user.id.to_string(),
            full_name: user.full_name,
            email: user.email,
        },
    }))
}
