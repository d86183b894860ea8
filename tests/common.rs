// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, user, and recipe creation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared test utilities for `savora`
//!
//! Common setup functions to reduce duplication across integration tests.

use std::sync::{Arc, Once};

use anyhow::Result;
use savora::database_plugins::{factory::Database, DatabaseProvider};
use savora::models::{NewRecipe, Recipe, User};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .try_init();
    });
}

/// Standard in-memory test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    Ok(Arc::new(database))
}

/// Create and persist a user with the given email
pub async fn create_test_user(database: &Database, email: &str) -> Result<User> {
    let user = User::new("Test User".into(), email, "hashed_password_123".into());
    database.create_user(&user).await?;
    Ok(user)
}

/// Descriptive fields for a plain dessert recipe
pub fn recipe_fields(title: &str) -> NewRecipe {
    NewRecipe {
        title: title.to_owned(),
        description: "A reliable crowd pleaser.".to_owned(),
        image: "https://img.example.com/recipe.jpg".to_owned(),
        prep_time: 30,
        difficulty: "Easy".to_owned(),
        category: "Dessert".to_owned(),
        cuisine: "French".to_owned(),
        diet: "Vegetarian".to_owned(),
        serves: 4,
        calories: Some(350),
        ingredients: vec!["flour".to_owned(), "sugar".to_owned()],
        instructions: vec!["Mix.".to_owned(), "Bake.".to_owned()],
    }
}

/// Create and persist a recipe owned by `owner`
pub async fn create_test_recipe(database: &Database, owner: Uuid, title: &str) -> Result<Recipe> {
    let recipe = Recipe::new(owner, recipe_fields(title));
    database.create_recipe(&recipe).await?;
    Ok(recipe)
}
