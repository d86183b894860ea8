// ABOUTME: Core data models for the Savora recipe API
// ABOUTME: Defines Recipe, User, rating entries, and the listing filter/projection types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! # Data Models
//!
//! Core data structures used throughout the Savora API, together with the
//! aggregate-maintenance rules that keep derived statistics consistent:
//!
//! - `average_rating` is always the arithmetic mean of the current rating
//!   entries (recomputed from the full collection, never incrementally);
//! - `rating_count` always equals the number of distinct raters;
//! - `liked_by` membership is the source of truth for likes, with `likes`
//!   as a cached count clamped at zero.
//!
//! These rules live here as pure methods so they can be exercised without a
//! running store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest accepted rating value
pub const RATING_MIN: u8 = 1;
/// Largest accepted rating value
pub const RATING_MAX: u8 = 5;

/// Normalize an email address for storage and lookup.
///
/// Emails are unique case-insensitively; they are trimmed and lowercased
/// once on the way in so every comparison afterwards is a plain equality.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Cheap shape check for email addresses.
///
/// Deliverability is the mail system's problem; this only rejects obvious
/// garbage before it reaches the unique index.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    email.len() >= 5 && email.contains('@') && email.contains('.') && !email.contains(' ')
}

/// A single user's rating of a recipe, stored on the recipe side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRating {
    /// The rating user
    pub user_id: Uuid,
    /// Rating value in [`RATING_MIN`], [`RATING_MAX`]
    pub rating: u8,
}

/// The user-side mirror of a rating, keyed by recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRating {
    /// The rated recipe
    pub recipe_id: Uuid,
    /// Rating value in [`RATING_MIN`], [`RATING_MAX`]
    pub rating: u8,
}

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,
    /// Display name
    pub full_name: String,
    /// Email address (unique case-insensitively, stored lowercased)
    pub email: String,
    /// Bcrypt password hash; never serialized into responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Mirror of this user's recipe ratings, at most one entry per recipe
    pub ratings: Vec<UserRating>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a freshly generated ID
    #[must_use]
    pub fn new(full_name: String, email: &str, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            full_name,
            email: normalize_email(email),
            password_hash,
            ratings: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Upsert this user's rating of a recipe (the user-side mirror).
    ///
    /// An existing entry for the recipe is overwritten in place; otherwise a
    /// new entry is appended. Repeated identical calls are no-ops after the
    /// first, which is what makes a retried rating submission safe.
    pub fn record_rating(&mut self, recipe_id: Uuid, rating: u8) {
        if let Some(entry) = self.ratings.iter_mut().find(|r| r.recipe_id == recipe_id) {
            entry.rating = rating;
        } else {
            self.ratings.push(UserRating { recipe_id, rating });
        }
        self.updated_at = Utc::now();
    }
}

/// A recipe document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe ID
    pub id: Uuid,
    /// Recipe title
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Image reference (URL or storage key)
    pub image: String,
    /// Preparation time in minutes
    pub prep_time: i64,
    /// Difficulty label (e.g. "Easy", "Medium", "Hard")
    pub difficulty: String,
    /// Category label (e.g. "Dessert")
    pub category: String,
    /// Cuisine label (e.g. "Italian")
    pub cuisine: String,
    /// Diet label (e.g. "Vegetarian")
    pub diet: String,
    /// Number of servings
    pub serves: i64,
    /// Calories per serving, when known
    pub calories: Option<i64>,
    /// Ordered ingredient lines
    pub ingredients: Vec<String>,
    /// Ordered instruction steps
    pub instructions: Vec<String>,
    /// Owning user; immutable after creation
    pub user_id: Uuid,
    /// Cached like count; equals `liked_by.len()` under normal operation
    pub likes: i64,
    /// Users who currently like this recipe (source of truth for likes)
    pub liked_by: Vec<Uuid>,
    /// View counter, incremented atomically at the store level
    pub views: i64,
    /// Mean of all rating values, 0.0 when unrated
    pub average_rating: f64,
    /// Number of distinct raters
    pub rating_count: i64,
    /// Rating entries, at most one per user
    pub ratings: Vec<RecipeRating>,
    /// Creation time (listing sort key, newest first)
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Descriptive fields for a new recipe, as supplied by the creating user
#[derive(Debug, Clone, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub image: String,
    pub prep_time: i64,
    pub difficulty: String,
    pub category: String,
    pub cuisine: String,
    pub diet: String,
    pub serves: i64,
    pub calories: Option<i64>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Create a new recipe owned by `user_id`, with zeroed engagement state
    #[must_use]
    pub fn new(user_id: Uuid, fields: NewRecipe) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            description: fields.description,
            image: fields.image,
            prep_time: fields.prep_time,
            difficulty: fields.difficulty,
            category: fields.category,
            cuisine: fields.cuisine,
            diet: fields.diet,
            serves: fields.serves,
            calories: fields.calories,
            ingredients: fields.ingredients,
            instructions: fields.instructions,
            user_id,
            likes: 0,
            liked_by: Vec::new(),
            views: 0,
            average_rating: 0.0,
            rating_count: 0,
            ratings: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user_id` currently likes this recipe
    #[must_use]
    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.liked_by.contains(&user_id)
    }

    /// Toggle `user_id`'s like and return the new liked state.
    ///
    /// Membership in `liked_by` decides the direction; the cached `likes`
    /// counter follows it. The decrement clamps at zero so a counter that
    /// drifted from its backing set can never go negative.
    pub fn toggle_like(&mut self, user_id: Uuid) -> bool {
        if let Some(pos) = self.liked_by.iter().position(|id| *id == user_id) {
            self.liked_by.remove(pos);
            self.likes = (self.likes - 1).max(0);
            false
        } else {
            self.liked_by.push(user_id);
            self.likes += 1;
            true
        }
    }

    /// Upsert `user_id`'s rating and recompute the derived aggregates.
    ///
    /// Returns `true` when this is the user's first rating of the recipe.
    /// The average is recomputed from the full collection rather than
    /// maintained incrementally, so floating-point error cannot accumulate
    /// across many updates.
    pub fn apply_rating(&mut self, user_id: Uuid, rating: u8) -> bool {
        let newly_rated =
            if let Some(entry) = self.ratings.iter_mut().find(|r| r.user_id == user_id) {
                entry.rating = rating;
                false
            } else {
                self.ratings.push(RecipeRating { user_id, rating });
                true
            };
        self.recompute_rating_stats();
        newly_rated
    }

    fn recompute_rating_stats(&mut self) {
        self.rating_count = self.ratings.len() as i64;
        self.average_rating = if self.ratings.is_empty() {
            0.0
        } else {
            let sum: f64 = self.ratings.iter().map(|r| f64::from(r.rating)).sum();
            sum / self.ratings.len() as f64
        };
    }
}

/// Partial update of a recipe's descriptive fields.
///
/// Engagement and rating state is deliberately absent; those change only
/// through their own operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub prep_time: Option<i64>,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub cuisine: Option<String>,
    pub diet: Option<String>,
    pub serves: Option<i64>,
    pub calories: Option<i64>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
}

impl RecipePatch {
    /// Whether the patch changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.prep_time.is_none()
            && self.difficulty.is_none()
            && self.category.is_none()
            && self.cuisine.is_none()
            && self.diet.is_none()
            && self.serves.is_none()
            && self.calories.is_none()
            && self.ingredients.is_none()
            && self.instructions.is_none()
    }
}

/// Store-agnostic listing filter.
///
/// Omitted fields impose no constraint. `search` matches case-insensitive
/// substrings of the title, the description, or any ingredient line; the
/// remaining fields are exact matches.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub cuisine: Option<String>,
    pub diet: Option<String>,
    pub difficulty: Option<String>,
}

/// Sort field for the popular listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopularSort {
    Likes,
    Views,
}

impl PopularSort {
    /// Parse from a query parameter; unrecognized values default to likes
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("views") => Self::Views,
            _ => Self::Likes,
        }
    }

    /// Name of the counter this sort orders by
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::Likes => "likes",
            Self::Views => "views",
        }
    }
}

/// Owner identity embedded in recipe listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeOwner {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

/// A recipe together with its owner's public identity
#[derive(Debug, Clone, Serialize)]
pub struct RecipeWithOwner {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub owner: RecipeOwner,
}
