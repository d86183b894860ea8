// ABOUTME: Store abstraction layer for the Savora API
// ABOUTME: Plugin architecture for storage support with a SQLite backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! # Store Abstraction
//!
//! The [`DatabaseProvider`] trait is the repository interface the rest of
//! the application is written against: get-by-id, filtered find with
//! skip/limit and newest-first sort, count, full-document upsert save,
//! owner-conditioned update/delete, and a store-level atomic view
//! increment. Services receive a concrete [`factory::Database`] by
//! injection at construction; nothing in the crate reaches for an ambient
//! global connection.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{PopularSort, Recipe, RecipeFilter, RecipePatch, RecipeWithOwner, User};

pub mod factory;
pub mod sqlite;

/// Core store abstraction trait.
///
/// All storage backends implement this trait to provide a consistent
/// interface for the service layer.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone {
    /// Open a connection and run schema migrations
    async fn new(database_url: &str) -> Result<Self>
    where
        Self: Sized;

    /// Run schema migrations
    async fn migrate(&self) -> Result<()>;

    // ================================
    // Users
    // ================================

    /// Insert a new user account; the email must be unused
    async fn create_user(&self, user: &User) -> Result<Uuid>;

    /// Get a user by ID
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>>;

    /// Get a user by email address (matched case-insensitively)
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Upsert a full user document
    async fn save_user(&self, user: &User) -> Result<()>;

    /// Number of recipes whose `liked_by` contains this user
    async fn count_liked_recipes(&self, user_id: Uuid) -> Result<i64>;

    // ================================
    // Recipes
    // ================================

    /// Insert a new recipe
    async fn create_recipe(&self, recipe: &Recipe) -> Result<Uuid>;

    /// Get a recipe by ID
    async fn get_recipe(&self, recipe_id: Uuid) -> Result<Option<Recipe>>;

    /// Get a recipe by ID with its owner's public identity joined in
    async fn get_recipe_with_owner(&self, recipe_id: Uuid) -> Result<Option<RecipeWithOwner>>;

    /// Upsert a full recipe document
    async fn save_recipe(&self, recipe: &Recipe) -> Result<()>;

    /// Filtered page of recipes, newest first, owner-populated
    async fn list_recipes(
        &self,
        filter: &RecipeFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<RecipeWithOwner>>;

    /// Number of recipes matching `filter`, ignoring pagination
    async fn count_recipes(&self, filter: &RecipeFilter) -> Result<i64>;

    /// Apply a descriptive-field patch to a recipe, conditioned on
    /// ownership in the same statement. `None` means no recipe matched
    /// both the ID and the owner — absence and foreign ownership are
    /// indistinguishable by design.
    async fn update_recipe_for_owner(
        &self,
        recipe_id: Uuid,
        owner_id: Uuid,
        patch: &RecipePatch,
    ) -> Result<Option<Recipe>>;

    /// Delete a recipe, conditioned on ownership in the same statement
    async fn delete_recipe_for_owner(
        &self,
        recipe_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Recipe>>;

    /// Atomically increment a recipe's view counter and return the new
    /// count, or `None` when the recipe does not exist. Single store-level
    /// operation; never read-modify-write.
    async fn increment_recipe_views(&self, recipe_id: Uuid) -> Result<Option<i64>>;

    /// Top recipes by the chosen engagement counter, owner-populated
    async fn popular_recipes(&self, sort: PopularSort, limit: i64)
        -> Result<Vec<RecipeWithOwner>>;

    /// All recipes owned by a user, newest first, owner-populated
    async fn recipes_by_user(&self, user_id: Uuid) -> Result<Vec<RecipeWithOwner>>;
}
