// ABOUTME: Own-profile route handlers
// ABOUTME: Authenticated profile read and update endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! Own-profile routes. Both endpoints operate on the authenticated caller;
//! there is no public user lookup.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::context::ServerResources;
use crate::errors::AppResult;
use crate::middleware::AuthedUser;
use crate::services::users::{ProfileService, ProfileUpdate};

/// Profile update request; omitted fields are left untouched
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// Profile routes
pub fn routes() -> Router<Arc<ServerResources>> {
    Router::new().route("/me", get(get_me_handler).put(update_me_handler))
}

async fn get_me_handler(
    State(resources): State<Arc<ServerResources>>,
    user: AuthedUser,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileService::new(Arc::clone(&resources.database))
        .get_profile(user.user_id)
        .await?;
    Ok(Json(profile))
}

async fn update_me_handler(
    State(resources): State<Arc<ServerResources>>,
    user: AuthedUser,
    Json(request): Json<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileService::new(Arc::clone(&resources.database))
        .update_profile(
            user.user_id,
            ProfileUpdate {
                full_name: request.full_name,
                email: request.email,
            },
        )
        .await?;
    Ok(Json(profile))
}
