// ABOUTME: Recipe route handlers for CRUD, listings, likes, views, and ratings
// ABOUTME: Thin transport wrappers delegating to the recipe, engagement, and rating services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! Recipe routes.
//!
//! Listing, popular, by-user, get, and view-increment are public; create,
//! update, delete, like, and rate require authentication.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MessageResponse;
use crate::context::ServerResources;
use crate::errors::AppResult;
use crate::middleware::AuthedUser;
use crate::models::{NewRecipe, PopularSort, Recipe, RecipeFilter, RecipePatch};
use crate::pagination::Pagination;
use crate::services::engagement::EngagementService;
use crate::services::ratings::RatingService;
use crate::services::recipes::RecipeService;

/// Listing query parameters.
///
/// `page` and `limit` arrive as raw strings so that non-numeric input is
/// rejected with the validation taxonomy rather than a framework error.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub cuisine: Option<String>,
    pub diet: Option<String>,
    pub difficulty: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Popular listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PopularParams {
    /// Sort field: "likes" (default) or "views"
    pub by: Option<String>,
    pub limit: Option<String>,
}

/// Rating submission body
#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub rating: i64,
}

/// Mutation acknowledgement carrying the affected recipe
#[derive(Debug, Serialize)]
pub struct RecipeMessageResponse {
    pub message: String,
    pub recipe: Recipe,
}

/// Like toggle response
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub message: String,
    pub liked: bool,
    pub likes: i64,
}

/// View increment response
#[derive(Debug, Serialize)]
pub struct ViewsResponse {
    pub views: i64,
}

/// Rating submission response
#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub message: String,
    pub average_rating: f64,
    pub rating_count: i64,
}

/// Recipe routes
pub fn routes() -> Router<Arc<ServerResources>> {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route("/popular", get(popular_handler))
        .route("/user/:user_id", get(by_user_handler))
        .route(
            "/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .route("/:id/views", post(views_handler))
        .route("/:id/like", post(like_handler))
        .route("/:id/rate", post(rate_handler))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn list_handler(
    State(resources): State<Arc<ServerResources>>,
    Query(params): Query<RecipeListParams>,
) -> AppResult<impl IntoResponse> {
    let pagination = Pagination::from_params(params.page.as_deref(), params.limit.as_deref())?;
    let filter = RecipeFilter {
        search: non_empty(params.search),
        category: non_empty(params.category),
        cuisine: non_empty(params.cuisine),
        diet: non_empty(params.diet),
        difficulty: non_empty(params.difficulty),
    };
    let page = RecipeService::new(Arc::clone(&resources.database))
        .list(&filter, pagination)
        .await?;
    Ok(Json(page))
}

async fn create_handler(
    State(resources): State<Arc<ServerResources>>,
    user: AuthedUser,
    Json(fields): Json<NewRecipe>,
) -> AppResult<impl IntoResponse> {
    let recipe = RecipeService::new(Arc::clone(&resources.database))
        .create(user.user_id, fields)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RecipeMessageResponse {
            message: "Recipe created successfully.".to_owned(),
            recipe,
        }),
    ))
}

async fn popular_handler(
    State(resources): State<Arc<ServerResources>>,
    Query(params): Query<PopularParams>,
) -> AppResult<impl IntoResponse> {
    let limit = Pagination::from_params(None, params.limit.as_deref())?.limit;
    let sort = PopularSort::from_param(params.by.as_deref());
    let recipes = RecipeService::new(Arc::clone(&resources.database))
        .popular(sort, limit)
        .await?;
    Ok(Json(recipes))
}

async fn by_user_handler(
    State(resources): State<Arc<ServerResources>>,
    Path(user_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let recipes = RecipeService::new(Arc::clone(&resources.database))
        .by_user(user_id)
        .await?;
    Ok(Json(recipes))
}

async fn get_handler(
    State(resources): State<Arc<ServerResources>>,
    Path(recipe_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let recipe = RecipeService::new(Arc::clone(&resources.database))
        .get(recipe_id)
        .await?;
    Ok(Json(recipe))
}

async fn update_handler(
    State(resources): State<Arc<ServerResources>>,
    user: AuthedUser,
    Path(recipe_id): Path<Uuid>,
    Json(patch): Json<RecipePatch>,
) -> AppResult<impl IntoResponse> {
    let recipe = RecipeService::new(Arc::clone(&resources.database))
        .update(recipe_id, user.user_id, &patch)
        .await?;
    Ok(Json(RecipeMessageResponse {
        message: "Recipe updated.".to_owned(),
        recipe,
    }))
}

async fn delete_handler(
    State(resources): State<Arc<ServerResources>>,
    user: AuthedUser,
    Path(recipe_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    RecipeService::new(Arc::clone(&resources.database))
        .delete(recipe_id, user.user_id)
        .await?;
    Ok(Json(MessageResponse::new("Recipe deleted.")))
}

async fn views_handler(
    State(resources): State<Arc<ServerResources>>,
    Path(recipe_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let views = EngagementService::new(Arc::clone(&resources.database))
        .increment_views(recipe_id)
        .await?;
    Ok(Json(ViewsResponse { views }))
}

async fn like_handler(
    State(resources): State<Arc<ServerResources>>,
    user: AuthedUser,
    Path(recipe_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let summary = EngagementService::new(Arc::clone(&resources.database))
        .toggle_like(recipe_id, user.user_id)
        .await?;
    Ok(Json(LikeResponse {
        message: if summary.liked { "Liked" } else { "Unliked" }.to_owned(),
        liked: summary.liked,
        likes: summary.likes,
    }))
}

async fn rate_handler(
    State(resources): State<Arc<ServerResources>>,
    user: AuthedUser,
    Path(recipe_id): Path<Uuid>,
    Json(request): Json<RateRequest>,
) -> AppResult<impl IntoResponse> {
    let summary = RatingService::new(Arc::clone(&resources.database))
        .submit_rating(recipe_id, user.user_id, request.rating)
        .await?;
    Ok(Json(RateResponse {
        message: "Rating submitted.".to_owned(),
        average_rating: summary.average_rating,
        rating_count: summary.rating_count,
    }))
}
