// ABOUTME: Own-profile service
// ABOUTME: Profile read with favorite count and conflict-guarded profile update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! Own-profile read and update.
//!
//! The profile view augments the user record with `total_favorites`, the
//! number of recipes whose `liked_by` contains the user. Email changes are
//! rejected when the address already belongs to a different account,
//! matched case-insensitively.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::database_plugins::factory::Database;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::models::{is_valid_email, normalize_email, User};

/// Profile view: the user record plus derived favorite count.
///
/// The password hash is skipped by the user's own serialization rules.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: User,
    /// Number of recipes this user currently likes
    pub total_favorites: i64,
}

/// Requested profile changes; omitted fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// Own-profile operations
#[derive(Clone)]
pub struct ProfileService {
    database: Arc<Database>,
}

impl ProfileService {
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Fetch the caller's profile
    ///
    /// # Errors
    /// Not-found when the account no longer exists.
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<ProfileResponse> {
        let user = self
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        let total_favorites = self.database.count_liked_recipes(user_id).await?;
        Ok(ProfileResponse {
            user,
            total_favorites,
        })
    }

    /// Apply profile changes for the caller
    ///
    /// # Errors
    /// Validation error for a blank name or malformed email; conflict when
    /// the email already belongs to a different account; not-found when the
    /// account no longer exists.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> AppResult<ProfileResponse> {
        let mut user = self
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        if let Some(full_name) = update.full_name {
            if full_name.trim().is_empty() {
                return Err(AppError::validation("full_name must not be blank"));
            }
            user.full_name = full_name.trim().to_owned();
        }

        if let Some(email) = update.email {
            if !is_valid_email(&email) {
                return Err(AppError::validation("Invalid email format"));
            }
            let email = normalize_email(&email);
            if let Some(existing) = self.database.get_user_by_email(&email).await? {
                if existing.id != user_id {
                    return Err(AppError::conflict("Email already in use."));
                }
            }
            user.email = email;
        }

        user.updated_at = chrono::Utc::now();
        self.database.save_user(&user).await?;
        info!(user_id = %user_id, "profile updated");

        let total_favorites = self.database.count_liked_recipes(user_id).await?;
        Ok(ProfileResponse {
            user,
            total_favorites,
        })
    }
}
