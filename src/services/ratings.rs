// ABOUTME: Rating aggregation service
// ABOUTME: Records a user's rating on both sides of the user/recipe relationship
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! Rating submission and aggregate recomputation.
//!
//! A rating lives in two places: the recipe's rating collection (feeding
//! `average_rating` and `rating_count`) and a mirror on the rating user's
//! record (so "my ratings" needs no join). The store has no cross-document
//! transaction, so the two writes happen in a fixed order — recipe first,
//! then user. A user-side failure after the recipe write leaves the mirror
//! stale; it surfaces as a server error and the caller may retry, which is
//! safe because both sides upsert by key.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::database_plugins::factory::Database;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::models::{RATING_MAX, RATING_MIN};

/// Updated aggregates returned after a rating submission
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RatingSummary {
    /// Mean of all current rating values
    pub average_rating: f64,
    /// Number of distinct raters
    pub rating_count: i64,
}

/// Records ratings and maintains the derived aggregates
#[derive(Clone)]
pub struct RatingService {
    database: Arc<Database>,
}

impl RatingService {
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Submit `user_id`'s rating of a recipe, upserting by user.
    ///
    /// Re-submitting overwrites the previous value without changing the
    /// rater count; re-submitting the identical value changes nothing at
    /// all, so the operation is retry-safe.
    ///
    /// # Errors
    /// Validation error for a rating outside [1, 5]; not-found for an
    /// absent recipe or rater; store failures surface as server errors.
    pub async fn submit_rating(
        &self,
        recipe_id: Uuid,
        user_id: Uuid,
        rating: i64,
    ) -> AppResult<RatingSummary> {
        if rating < i64::from(RATING_MIN) || rating > i64::from(RATING_MAX) {
            return Err(AppError::out_of_range("Rating must be between 1 and 5."));
        }
        let rating = rating as u8;

        let mut recipe = self
            .database
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))?;

        let newly_rated = recipe.apply_rating(user_id, rating);
        self.database.save_recipe(&recipe).await?;

        // Recipe side is committed; everything below mirrors it onto the
        // user record.
        let mut user = self
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        user.record_rating(recipe_id, rating);
        self.database.save_user(&user).await?;

        info!(
            recipe_id = %recipe_id,
            user_id = %user_id,
            rating,
            newly_rated,
            average = recipe.average_rating,
            "rating submitted"
        );

        Ok(RatingSummary {
            average_rating: recipe.average_rating,
            rating_count: recipe.rating_count,
        })
    }
}
