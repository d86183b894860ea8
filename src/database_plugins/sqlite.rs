// ABOUTME: SQLite store implementation
// ABOUTME: Implements the DatabaseProvider trait over sqlx with JSON document columns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! SQLite store implementation
//!
//! Document-flavored collections (`ingredients`, `instructions`,
//! `liked_by`, `ratings`) are stored as JSON TEXT columns; element matching
//! goes through SQLite's `json_each`. Uuids are stored as hyphenated TEXT.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::debug;
use uuid::Uuid;

use super::DatabaseProvider;
use crate::models::{
    PopularSort, Recipe, RecipeFilter, RecipeOwner, RecipePatch, RecipeWithOwner, User,
};

/// SQLite database implementation
#[derive(Clone, Debug)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn new(database_url: &str) -> Result<Self> {
        // An in-memory database exists per connection, so the pool must be
        // pinned to a single long-lived connection to present one database.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(database_url)
                .await?
        } else {
            // mode=rwc creates the database file if it doesn't exist
            SqlitePool::connect(&format!("{database_url}?mode=rwc")).await?
        };

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        debug!("running sqlite migrations");

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                full_name TEXT NOT NULL,
                email TEXT NOT NULL COLLATE NOCASE UNIQUE,
                password_hash TEXT NOT NULL,
                ratings TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                image TEXT NOT NULL,
                prep_time INTEGER NOT NULL,
                difficulty TEXT NOT NULL,
                category TEXT NOT NULL,
                cuisine TEXT NOT NULL,
                diet TEXT NOT NULL,
                serves INTEGER NOT NULL,
                calories INTEGER,
                ingredients TEXT NOT NULL DEFAULT '[]',
                instructions TEXT NOT NULL DEFAULT '[]',
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                likes INTEGER NOT NULL DEFAULT 0,
                liked_by TEXT NOT NULL DEFAULT '[]',
                views INTEGER NOT NULL DEFAULT 0,
                average_rating REAL NOT NULL DEFAULT 0,
                rating_count INTEGER NOT NULL DEFAULT 0,
                ratings TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        for statement in [
            "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)",
            "CREATE INDEX IF NOT EXISTS idx_recipes_user_id ON recipes(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_recipes_category ON recipes(category)",
            "CREATE INDEX IF NOT EXISTS idx_recipes_cuisine ON recipes(cuisine)",
            "CREATE INDEX IF NOT EXISTS idx_recipes_diet ON recipes(diet)",
            "CREATE INDEX IF NOT EXISTS idx_recipes_difficulty ON recipes(difficulty)",
            "CREATE INDEX IF NOT EXISTS idx_recipes_created_at ON recipes(created_at)",
            "CREATE INDEX IF NOT EXISTS idx_recipes_likes ON recipes(likes)",
            "CREATE INDEX IF NOT EXISTS idx_recipes_views ON recipes(views)",
        ] {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        Ok(())
    }

    async fn create_user(&self, user: &User) -> Result<Uuid> {
        sqlx::query(
            r"
            INSERT INTO users (id, full_name, email, password_hash, ratings, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(serde_json::to_string(&user.ratings)?)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(user.id)
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?
            .map(|row| user_from_row(&row))
            .transpose()
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        // email carries COLLATE NOCASE, so equality is case-insensitive
        sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| user_from_row(&row))
            .transpose()
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, full_name, email, password_hash, ratings, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT(id) DO UPDATE SET
                full_name = excluded.full_name,
                email = excluded.email,
                password_hash = excluded.password_hash,
                ratings = excluded.ratings,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(serde_json::to_string(&user.ratings)?)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn count_liked_recipes(&self, user_id: Uuid) -> Result<i64> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) AS count FROM recipes
            WHERE EXISTS (SELECT 1 FROM json_each(recipes.liked_by) WHERE json_each.value = $1)
            ",
        )
        .bind(user_id.to_string())
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_get("count")?)
    }

    async fn create_recipe(&self, recipe: &Recipe) -> Result<Uuid> {
        self.save_recipe(recipe).await?;
        Ok(recipe.id)
    }

    async fn get_recipe(&self, recipe_id: Uuid) -> Result<Option<Recipe>> {
        sqlx::query("SELECT * FROM recipes WHERE id = $1")
            .bind(recipe_id.to_string())
            .fetch_optional(&self.pool)
            .await?
            .map(|row| recipe_from_row(&row))
            .transpose()
    }

    async fn get_recipe_with_owner(&self, recipe_id: Uuid) -> Result<Option<RecipeWithOwner>> {
        sqlx::query(
            r"
            SELECT r.*, u.full_name AS owner_full_name, u.email AS owner_email
            FROM recipes r JOIN users u ON u.id = r.user_id
            WHERE r.id = $1
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_optional(&self.pool)
        .await?
        .map(|row| recipe_with_owner_from_row(&row))
        .transpose()
    }

    async fn save_recipe(&self, recipe: &Recipe) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO recipes (
                id, title, description, image, prep_time, difficulty, category,
                cuisine, diet, serves, calories, ingredients, instructions,
                user_id, likes, liked_by, views, average_rating, rating_count,
                ratings, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20, $21, $22)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                image = excluded.image,
                prep_time = excluded.prep_time,
                difficulty = excluded.difficulty,
                category = excluded.category,
                cuisine = excluded.cuisine,
                diet = excluded.diet,
                serves = excluded.serves,
                calories = excluded.calories,
                ingredients = excluded.ingredients,
                instructions = excluded.instructions,
                likes = excluded.likes,
                liked_by = excluded.liked_by,
                views = excluded.views,
                average_rating = excluded.average_rating,
                rating_count = excluded.rating_count,
                ratings = excluded.ratings,
                updated_at = excluded.updated_at
            ",
        )
        .bind(recipe.id.to_string())
        .bind(&recipe.title)
        .bind(&recipe.description)
        .bind(&recipe.image)
        .bind(recipe.prep_time)
        .bind(&recipe.difficulty)
        .bind(&recipe.category)
        .bind(&recipe.cuisine)
        .bind(&recipe.diet)
        .bind(recipe.serves)
        .bind(recipe.calories)
        .bind(serde_json::to_string(&recipe.ingredients)?)
        .bind(serde_json::to_string(&recipe.instructions)?)
        .bind(recipe.user_id.to_string())
        .bind(recipe.likes)
        .bind(serde_json::to_string(&recipe.liked_by)?)
        .bind(recipe.views)
        .bind(recipe.average_rating)
        .bind(recipe.rating_count)
        .bind(serde_json::to_string(&recipe.ratings)?)
        .bind(recipe.created_at)
        .bind(recipe.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_recipes(
        &self,
        filter: &RecipeFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<RecipeWithOwner>> {
        let (where_sql, binds) = filter_sql(filter);
        let sql = format!(
            "SELECT r.*, u.full_name AS owner_full_name, u.email AS owner_email \
             FROM recipes r JOIN users u ON u.id = r.user_id{where_sql} \
             ORDER BY r.created_at DESC, r.id LIMIT ? OFFSET ?"
        );
        let mut query = sqlx::query(&sql);
        for bind in binds {
            query = query.bind(bind);
        }
        let rows = query.bind(limit).bind(skip).fetch_all(&self.pool).await?;
        rows.iter().map(recipe_with_owner_from_row).collect()
    }

    async fn count_recipes(&self, filter: &RecipeFilter) -> Result<i64> {
        let (where_sql, binds) = filter_sql(filter);
        let sql = format!("SELECT COUNT(*) AS count FROM recipes r{where_sql}");
        let mut query = sqlx::query(&sql);
        for bind in binds {
            query = query.bind(bind);
        }
        let row = query.fetch_one(&self.pool).await?;
        Ok(row.try_get("count")?)
    }

    async fn update_recipe_for_owner(
        &self,
        recipe_id: Uuid,
        owner_id: Uuid,
        patch: &RecipePatch,
    ) -> Result<Option<Recipe>> {
        let ingredients = patch
            .ingredients
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let instructions = patch
            .instructions
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        // Ownership is part of the WHERE clause, so "absent" and "owned by
        // someone else" both come back as zero rows.
        sqlx::query(
            r"
            UPDATE recipes SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                image = COALESCE($3, image),
                prep_time = COALESCE($4, prep_time),
                difficulty = COALESCE($5, difficulty),
                category = COALESCE($6, category),
                cuisine = COALESCE($7, cuisine),
                diet = COALESCE($8, diet),
                serves = COALESCE($9, serves),
                calories = COALESCE($10, calories),
                ingredients = COALESCE($11, ingredients),
                instructions = COALESCE($12, instructions),
                updated_at = $13
            WHERE id = $14 AND user_id = $15
            RETURNING *
            ",
        )
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(&patch.image)
        .bind(patch.prep_time)
        .bind(&patch.difficulty)
        .bind(&patch.category)
        .bind(&patch.cuisine)
        .bind(&patch.diet)
        .bind(patch.serves)
        .bind(patch.calories)
        .bind(ingredients)
        .bind(instructions)
        .bind(Utc::now())
        .bind(recipe_id.to_string())
        .bind(owner_id.to_string())
        .fetch_optional(&self.pool)
        .await?
        .map(|row| recipe_from_row(&row))
        .transpose()
    }

    async fn delete_recipe_for_owner(
        &self,
        recipe_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Recipe>> {
        sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2 RETURNING *")
            .bind(recipe_id.to_string())
            .bind(owner_id.to_string())
            .fetch_optional(&self.pool)
            .await?
            .map(|row| recipe_from_row(&row))
            .transpose()
    }

    async fn increment_recipe_views(&self, recipe_id: Uuid) -> Result<Option<i64>> {
        // Single atomic statement; concurrent increments never lose updates.
        let row = sqlx::query("UPDATE recipes SET views = views + 1 WHERE id = $1 RETURNING views")
            .bind(recipe_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| r.try_get("views")).transpose().map_err(Into::into)
    }

    async fn popular_recipes(
        &self,
        sort: PopularSort,
        limit: i64,
    ) -> Result<Vec<RecipeWithOwner>> {
        let sql = format!(
            "SELECT r.*, u.full_name AS owner_full_name, u.email AS owner_email \
             FROM recipes r JOIN users u ON u.id = r.user_id \
             ORDER BY r.{} DESC, r.id LIMIT $1",
            sort.field_name()
        );
        let rows = sqlx::query(&sql).bind(limit).fetch_all(&self.pool).await?;
        rows.iter().map(recipe_with_owner_from_row).collect()
    }

    async fn recipes_by_user(&self, user_id: Uuid) -> Result<Vec<RecipeWithOwner>> {
        let rows = sqlx::query(
            r"
            SELECT r.*, u.full_name AS owner_full_name, u.email AS owner_email
            FROM recipes r JOIN users u ON u.id = r.user_id
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC, r.id
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(recipe_with_owner_from_row).collect()
    }
}

/// Build the WHERE clause and bind values for a listing filter.
///
/// Uses `?` placeholders; callers must bind the returned values first, in
/// order, before any pagination binds.
fn filter_sql(filter: &RecipeFilter) -> (String, Vec<String>) {
    let mut clauses: Vec<String> = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    if let Some(search) = filter.search.as_deref() {
        let pattern = format!("%{}%", escape_like(search));
        clauses.push(
            "(r.title LIKE ? ESCAPE '\\' OR r.description LIKE ? ESCAPE '\\' \
             OR EXISTS (SELECT 1 FROM json_each(r.ingredients) \
                        WHERE json_each.value LIKE ? ESCAPE '\\'))"
                .to_owned(),
        );
        binds.push(pattern.clone());
        binds.push(pattern.clone());
        binds.push(pattern);
    }

    for (column, value) in [
        ("category", &filter.category),
        ("cuisine", &filter.cuisine),
        ("diet", &filter.diet),
        ("difficulty", &filter.difficulty),
    ] {
        if let Some(value) = value {
            clauses.push(format!("r.{column} = ?"));
            binds.push(value.clone());
        }
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };
    (where_sql, binds)
}

/// Escape LIKE wildcards so search terms match literally
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn parse_uuid(raw: &str) -> Result<Uuid> {
    Ok(Uuid::parse_str(raw)?)
}

fn user_from_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: parse_uuid(&row.try_get::<String, _>("id")?)?,
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        ratings: serde_json::from_str(&row.try_get::<String, _>("ratings")?)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

fn recipe_from_row(row: &SqliteRow) -> Result<Recipe> {
    Ok(Recipe {
        id: parse_uuid(&row.try_get::<String, _>("id")?)?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        image: row.try_get("image")?,
        prep_time: row.try_get("prep_time")?,
        difficulty: row.try_get("difficulty")?,
        category: row.try_get("category")?,
        cuisine: row.try_get("cuisine")?,
        diet: row.try_get("diet")?,
        serves: row.try_get("serves")?,
        calories: row.try_get("calories")?,
        ingredients: serde_json::from_str(&row.try_get::<String, _>("ingredients")?)?,
        instructions: serde_json::from_str(&row.try_get::<String, _>("instructions")?)?,
        user_id: parse_uuid(&row.try_get::<String, _>("user_id")?)?,
        likes: row.try_get("likes")?,
        liked_by: serde_json::from_str(&row.try_get::<String, _>("liked_by")?)?,
        views: row.try_get("views")?,
        average_rating: row.try_get("average_rating")?,
        rating_count: row.try_get("rating_count")?,
        ratings: serde_json::from_str(&row.try_get::<String, _>("ratings")?)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

fn recipe_with_owner_from_row(row: &SqliteRow) -> Result<RecipeWithOwner> {
    let recipe = recipe_from_row(row)?;
    let owner = RecipeOwner {
        id: recipe.user_id,
        full_name: row.try_get("owner_full_name")?,
        email: row.try_get("owner_email")?,
    };
    Ok(RecipeWithOwner { recipe, owner })
}
