// ABOUTME: Integration tests for like toggling and view counting
// ABOUTME: Validates toggle round trips, counter clamping, and lost-update-free increments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use savora::database_plugins::DatabaseProvider;
use savora::errors::ErrorCode;
use savora::services::engagement::EngagementService;
use std::sync::Arc;
use uuid::Uuid;

#[tokio::test]
async fn test_toggle_like_round_trip() {
    let database = common::create_test_database().await.unwrap();
    let owner = common::create_test_user(&database, "owner@example.com")
        .await
        .unwrap();
    let fan = common::create_test_user(&database, "fan@example.com")
        .await
        .unwrap();
    let recipe = common::create_test_recipe(&database, owner.id, "Focaccia")
        .await
        .unwrap();

    let service = EngagementService::new(Arc::clone(&database));

    let summary = service.toggle_like(recipe.id, fan.id).await.unwrap();
    assert!(summary.liked);
    assert_eq!(summary.likes, 1);

    // Second toggle returns to the original state.
    let summary = service.toggle_like(recipe.id, fan.id).await.unwrap();
    assert!(!summary.liked);
    assert_eq!(summary.likes, 0);

    let stored = database.get_recipe(recipe.id).await.unwrap().unwrap();
    assert!(stored.liked_by.is_empty());
    assert_eq!(stored.likes, 0);
}

#[tokio::test]
async fn test_likes_count_tracks_distinct_users() {
    let database = common::create_test_database().await.unwrap();
    let owner = common::create_test_user(&database, "owner@example.com")
        .await
        .unwrap();
    let a = common::create_test_user(&database, "a@example.com").await.unwrap();
    let b = common::create_test_user(&database, "b@example.com").await.unwrap();
    let recipe = common::create_test_recipe(&database, owner.id, "Bagels")
        .await
        .unwrap();

    let service = EngagementService::new(Arc::clone(&database));

    service.toggle_like(recipe.id, a.id).await.unwrap();
    let summary = service.toggle_like(recipe.id, b.id).await.unwrap();
    assert_eq!(summary.likes, 2);

    let summary = service.toggle_like(recipe.id, a.id).await.unwrap();
    assert!(!summary.liked);
    assert_eq!(summary.likes, 1);

    let stored = database.get_recipe(recipe.id).await.unwrap().unwrap();
    assert_eq!(stored.liked_by, vec![b.id]);
}

#[tokio::test]
async fn test_unlike_clamps_drifted_counter_at_zero() {
    let database = common::create_test_database().await.unwrap();
    let owner = common::create_test_user(&database, "owner@example.com")
        .await
        .unwrap();
    let fan = common::create_test_user(&database, "fan@example.com")
        .await
        .unwrap();

    // Persist a recipe whose cached counter already drifted below its set.
    let mut recipe = common::create_test_recipe(&database, owner.id, "Pretzels")
        .await
        .unwrap();
    recipe.liked_by.push(fan.id);
    recipe.likes = 0;
    database.save_recipe(&recipe).await.unwrap();

    let service = EngagementService::new(Arc::clone(&database));
    let summary = service.toggle_like(recipe.id, fan.id).await.unwrap();
    assert!(!summary.liked);
    assert_eq!(summary.likes, 0);
}

#[tokio::test]
async fn test_toggle_like_unknown_recipe_not_found() {
    let database = common::create_test_database().await.unwrap();
    let fan = common::create_test_user(&database, "fan@example.com")
        .await
        .unwrap();

    let service = EngagementService::new(Arc::clone(&database));
    let err = service
        .toggle_like(Uuid::new_v4(), fan.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_increment_views_returns_running_count() {
    let database = common::create_test_database().await.unwrap();
    let owner = common::create_test_user(&database, "owner@example.com")
        .await
        .unwrap();
    let recipe = common::create_test_recipe(&database, owner.id, "Scones")
        .await
        .unwrap();

    let service = EngagementService::new(Arc::clone(&database));
    assert_eq!(service.increment_views(recipe.id).await.unwrap(), 1);
    assert_eq!(service.increment_views(recipe.id).await.unwrap(), 2);
    assert_eq!(service.increment_views(recipe.id).await.unwrap(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_view_increments_lose_no_updates() {
    let database = common::create_test_database().await.unwrap();
    let owner = common::create_test_user(&database, "owner@example.com")
        .await
        .unwrap();
    let recipe = common::create_test_recipe(&database, owner.id, "Brioche")
        .await
        .unwrap();

    const CALLERS: usize = 20;
    let mut handles = Vec::with_capacity(CALLERS);
    for _ in 0..CALLERS {
        let service = EngagementService::new(Arc::clone(&database));
        let recipe_id = recipe.id;
        handles.push(tokio::spawn(async move {
            service.increment_views(recipe_id).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = database.get_recipe(recipe.id).await.unwrap().unwrap();
    assert_eq!(stored.views, CALLERS as i64);
}

#[tokio::test]
async fn test_increment_views_unknown_recipe_not_found() {
    let database = common::create_test_database().await.unwrap();
    let service = EngagementService::new(Arc::clone(&database));
    let err = service.increment_views(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}
