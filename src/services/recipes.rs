// ABOUTME: Recipe CRUD and listing service
// ABOUTME: Ownership-checked mutations plus the filtered/paginated listing envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! Recipe CRUD, listing, and ownership checks.
//!
//! Update and delete are conditioned on ownership inside a single store
//! operation; zero rows matched yields one ambiguous error so a non-owner
//! learns nothing about whether the recipe exists.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::database_plugins::factory::Database;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::models::{
    NewRecipe, PopularSort, Recipe, RecipeFilter, RecipePatch, RecipeWithOwner,
};
use crate::pagination::Pagination;

/// Paginated listing envelope
#[derive(Debug, Serialize)]
pub struct RecipeListPage {
    /// Page slice, owner-populated, newest first
    pub recipes: Vec<RecipeWithOwner>,
    /// Count of all matches, ignoring pagination
    pub total: i64,
    /// 1-indexed page number
    pub page: i64,
    /// Total number of pages
    pub pages: i64,
}

/// Recipe CRUD and listings
#[derive(Clone)]
pub struct RecipeService {
    database: Arc<Database>,
}

impl RecipeService {
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Create a recipe owned by `owner_id`
    ///
    /// # Errors
    /// Validation error when a required descriptive field is missing or
    /// empty; store failures surface as server errors.
    pub async fn create(&self, owner_id: Uuid, fields: NewRecipe) -> AppResult<Recipe> {
        validate_new_recipe(&fields)?;
        let recipe = Recipe::new(owner_id, fields);
        self.database.create_recipe(&recipe).await?;
        info!(recipe_id = %recipe.id, owner_id = %owner_id, "recipe created");
        Ok(recipe)
    }

    /// Get a recipe by ID, owner-populated
    ///
    /// # Errors
    /// Not-found for an absent recipe.
    pub async fn get(&self, recipe_id: Uuid) -> AppResult<RecipeWithOwner> {
        self.database
            .get_recipe_with_owner(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))
    }

    /// Filtered, paginated listing, newest first
    ///
    /// # Errors
    /// Store failures surface as server errors.
    pub async fn list(
        &self,
        filter: &RecipeFilter,
        pagination: Pagination,
    ) -> AppResult<RecipeListPage> {
        let total = self.database.count_recipes(filter).await?;
        let recipes = self
            .database
            .list_recipes(filter, pagination.skip(), pagination.limit)
            .await?;
        Ok(RecipeListPage {
            recipes,
            total,
            page: pagination.page,
            pages: pagination.pages(total),
        })
    }

    /// Update a recipe's descriptive fields; owner only
    ///
    /// # Errors
    /// Validation error for blank field values; the ambiguous
    /// not-found-or-unauthorized error when no recipe matches both the ID
    /// and the caller.
    pub async fn update(
        &self,
        recipe_id: Uuid,
        caller_id: Uuid,
        patch: &RecipePatch,
    ) -> AppResult<Recipe> {
        validate_patch(patch)?;
        let updated = self
            .database
            .update_recipe_for_owner(recipe_id, caller_id, patch)
            .await?
            .ok_or_else(|| AppError::not_found_or_unauthorized("Recipe"))?;
        info!(recipe_id = %recipe_id, caller_id = %caller_id, "recipe updated");
        Ok(updated)
    }

    /// Delete a recipe; owner only
    ///
    /// # Errors
    /// The ambiguous not-found-or-unauthorized error when no recipe matches
    /// both the ID and the caller.
    pub async fn delete(&self, recipe_id: Uuid, caller_id: Uuid) -> AppResult<()> {
        self.database
            .delete_recipe_for_owner(recipe_id, caller_id)
            .await?
            .ok_or_else(|| AppError::not_found_or_unauthorized("Recipe"))?;
        info!(recipe_id = %recipe_id, caller_id = %caller_id, "recipe deleted");
        Ok(())
    }

    /// Top recipes by likes or views, truncated to `limit`
    ///
    /// # Errors
    /// Store failures surface as server errors.
    pub async fn popular(
        &self,
        sort: PopularSort,
        limit: i64,
    ) -> AppResult<Vec<RecipeWithOwner>> {
        Ok(self.database.popular_recipes(sort, limit).await?)
    }

    /// All recipes owned by `user_id`, newest first
    ///
    /// # Errors
    /// Store failures surface as server errors.
    pub async fn by_user(&self, user_id: Uuid) -> AppResult<Vec<RecipeWithOwner>> {
        Ok(self.database.recipes_by_user(user_id).await?)
    }
}

fn validate_new_recipe(fields: &NewRecipe) -> AppResult<()> {
    for (name, value) in [
        ("title", &fields.title),
        ("description", &fields.description),
        ("image", &fields.image),
        ("difficulty", &fields.difficulty),
        ("category", &fields.category),
        ("cuisine", &fields.cuisine),
        ("diet", &fields.diet),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::missing_field(format!("{name} is required")));
        }
    }
    if fields.prep_time < 0 {
        return Err(AppError::out_of_range("prep_time must not be negative"));
    }
    if fields.serves < 1 {
        return Err(AppError::out_of_range("serves must be at least 1"));
    }
    if fields.ingredients.iter().all(|i| i.trim().is_empty()) || fields.ingredients.is_empty() {
        return Err(AppError::missing_field("at least one ingredient is required"));
    }
    if fields.instructions.iter().all(|i| i.trim().is_empty()) || fields.instructions.is_empty() {
        return Err(AppError::missing_field(
            "at least one instruction is required",
        ));
    }
    Ok(())
}

fn validate_patch(patch: &RecipePatch) -> AppResult<()> {
    for (name, value) in [
        ("title", &patch.title),
        ("description", &patch.description),
        ("image", &patch.image),
        ("difficulty", &patch.difficulty),
        ("category", &patch.category),
        ("cuisine", &patch.cuisine),
        ("diet", &patch.diet),
    ] {
        if let Some(value) = value {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("{name} must not be blank")));
            }
        }
    }
    if matches!(patch.prep_time, Some(v) if v < 0) {
        return Err(AppError::out_of_range("prep_time must not be negative"));
    }
    if matches!(patch.serves, Some(v) if v < 1) {
        return Err(AppError::out_of_range("serves must be at least 1"));
    }
    Ok(())
}
