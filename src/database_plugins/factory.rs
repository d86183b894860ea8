// ABOUTME: Store factory and provider abstraction with URL-based backend detection
// ABOUTME: Wraps the SQLite backend behind a single Database enum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! Store factory for creating database providers
//!
//! Detects the backend from the connection string and delegates every
//! [`DatabaseProvider`] operation to the selected implementation.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use super::sqlite::SqliteDatabase;
use super::DatabaseProvider;
use crate::models::{PopularSort, Recipe, RecipeFilter, RecipePatch, RecipeWithOwner, User};

/// Supported database types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    SQLite,
    PostgreSQL,
}

/// Database instance wrapper that delegates to the appropriate implementation
#[derive(Clone, Debug)]
pub enum Database {
    SQLite(SqliteDatabase),
}

impl Database {
    /// Get a descriptive string for the current database backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::SQLite(_) => "SQLite",
        }
    }
}

/// Detect the database type from a connection string
///
/// # Errors
/// Returns an error for URL schemes no backend understands.
pub fn detect_database_type(database_url: &str) -> Result<DatabaseType> {
    if database_url.starts_with("sqlite:") {
        Ok(DatabaseType::SQLite)
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok(DatabaseType::PostgreSQL)
    } else {
        Err(anyhow!(
            "Unsupported database URL format: {database_url}. Use sqlite: URLs."
        ))
    }
}

#[async_trait]
impl DatabaseProvider for Database {
    async fn new(database_url: &str) -> Result<Self> {
        debug!("Detecting database type from URL");
        let db_type = detect_database_type(database_url)?;
        match db_type {
            DatabaseType::SQLite => {
                let db = SqliteDatabase::new(database_url).await?;
                info!("SQLite database initialized");
                Ok(Self::SQLite(db))
            }
            DatabaseType::PostgreSQL => Err(anyhow!(
                "PostgreSQL support is not enabled in this build; use a sqlite: URL"
            )),
        }
    }

    async fn migrate(&self) -> Result<()> {
        match self {
            Self::SQLite(db) => db.migrate().await,
        }
    }

    async fn create_user(&self, user: &User) -> Result<Uuid> {
        match self {
            Self::SQLite(db) => db.create_user(user).await,
        }
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        match self {
            Self::SQLite(db) => db.get_user(user_id).await,
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        match self {
            Self::SQLite(db) => db.get_user_by_email(email).await,
        }
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        match self {
            Self::SQLite(db) => db.save_user(user).await,
        }
    }

    async fn count_liked_recipes(&self, user_id: Uuid) -> Result<i64> {
        match self {
            Self::SQLite(db) => db.count_liked_recipes(user_id).await,
        }
    }

    async fn create_recipe(&self, recipe: &Recipe) -> Result<Uuid> {
        match self {
            Self::SQLite(db) => db.create_recipe(recipe).await,
        }
    }

    async fn get_recipe(&self, recipe_id: Uuid) -> Result<Option<Recipe>> {
        match self {
            Self::SQLite(db) => db.get_recipe(recipe_id).await,
        }
    }

    async fn get_recipe_with_owner(&self, recipe_id: Uuid) -> Result<Option<RecipeWithOwner>> {
        match self {
            Self::SQLite(db) => db.get_recipe_with_owner(recipe_id).await,
        }
    }

    async fn save_recipe(&self, recipe: &Recipe) -> Result<()> {
        match self {
            Self::SQLite(db) => db.save_recipe(recipe).await,
        }
    }

    async fn list_recipes(
        &self,
        filter: &RecipeFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<RecipeWithOwner>> {
        match self {
            Self::SQLite(db) => db.list_recipes(filter, skip, limit).await,
        }
    }

    async fn count_recipes(&self, filter: &RecipeFilter) -> Result<i64> {
        match self {
            Self::SQLite(db) => db.count_recipes(filter).await,
        }
    }

    async fn update_recipe_for_owner(
        &self,
        recipe_id: Uuid,
        owner_id: Uuid,
        patch: &RecipePatch,
    ) -> Result<Option<Recipe>> {
        match self {
            Self::SQLite(db) => db.update_recipe_for_owner(recipe_id, owner_id, patch).await,
        }
    }

    async fn delete_recipe_for_owner(
        &self,
        recipe_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Recipe>> {
        match self {
            Self::SQLite(db) => db.delete_recipe_for_owner(recipe_id, owner_id).await,
        }
    }

    async fn increment_recipe_views(&self, recipe_id: Uuid) -> Result<Option<i64>> {
        match self {
            Self::SQLite(db) => db.increment_recipe_views(recipe_id).await,
        }
    }

    async fn popular_recipes(
        &self,
        sort: PopularSort,
        limit: i64,
    ) -> Result<Vec<RecipeWithOwner>> {
        match self {
            Self::SQLite(db) => db.popular_recipes(sort, limit).await,
        }
    }

    async fn recipes_by_user(&self, user_id: Uuid) -> Result<Vec<RecipeWithOwner>> {
        match self {
            Self::SQLite(db) => db.recipes_by_user(user_id).await,
        }
    }
}
