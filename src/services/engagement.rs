// ABOUTME: Engagement counter service
// ABOUTME: Like-toggle and atomic view-increment semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! Like toggling and view counting.
//!
//! `liked_by` membership is the source of truth; `likes` is a cached count.
//! The toggle is a read-modify-write on a single document and is not
//! mutually exclusive across concurrent callers: two simultaneous toggles
//! by different users can race and leave `likes` undercounting its set.
//! That tradeoff is accepted; the decrement clamp keeps the counter from
//! ever going negative. View increments, by contrast, are a single atomic
//! store operation and lose no updates under concurrency.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::database_plugins::factory::Database;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};

/// Result of a like toggle
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LikeSummary {
    /// Whether the user now likes the recipe
    pub liked: bool,
    /// New cached like count
    pub likes: i64,
}

/// Owns like-toggle and view-increment semantics
#[derive(Clone)]
pub struct EngagementService {
    database: Arc<Database>,
}

impl EngagementService {
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Toggle `user_id`'s like on a recipe
    ///
    /// # Errors
    /// Not-found for an absent recipe; store failures surface as server
    /// errors.
    pub async fn toggle_like(&self, recipe_id: Uuid, user_id: Uuid) -> AppResult<LikeSummary> {
        let mut recipe = self
            .database
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))?;

        let liked = recipe.toggle_like(user_id);
        self.database.save_recipe(&recipe).await?;

        info!(recipe_id = %recipe_id, user_id = %user_id, liked, likes = recipe.likes, "like toggled");

        Ok(LikeSummary {
            liked,
            likes: recipe.likes,
        })
    }

    /// Increment a recipe's view counter and return the new count.
    ///
    /// Delegates to the store's atomic increment — this path is hit
    /// concurrently at high frequency with no identity check, so it must
    /// never be read-then-write.
    ///
    /// # Errors
    /// Not-found for an absent recipe; store failures surface as server
    /// errors.
    pub async fn increment_views(&self, recipe_id: Uuid) -> AppResult<i64> {
        self.database
            .increment_recipe_views(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))
    }
}
