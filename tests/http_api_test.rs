// ABOUTME: End-to-end HTTP tests over the axum router
// ABOUTME: Validates status classification, auth enforcement, and JSON response shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::sync::Arc;

use axum::body::Body;
use http::{header, Request, StatusCode};
use savora::auth::AuthManager;
use savora::config::{Environment, ServerConfig};
use savora::context::ServerResources;
use savora::database_plugins::{factory::Database, DatabaseProvider};
use savora::routes;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_app() -> axum::Router {
    common::init_test_logging();
    let database = Database::new("sqlite::memory:").await.unwrap();
    let config = ServerConfig {
        http_port: 0,
        database_url: "sqlite::memory:".to_owned(),
        jwt_secret: "integration-test-secret".to_owned(),
        jwt_expiry_hours: 24,
        environment: Environment::Testing,
    };
    let auth = AuthManager::new(config.jwt_secret.as_bytes(), config.jwt_expiry_hours);
    routes::router(Arc::new(ServerResources::new(database, auth, config)))
}

async fn request(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn signup_and_login(app: &axum::Router, full_name: &str, email: &str) -> String {
    let (status, _) = request(
        app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({"full_name": full_name, "email": email, "password": "hunter2hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": email, "password": "hunter2hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["jwt_token"].as_str().unwrap().to_owned()
}

fn recipe_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Tested end to end.",
        "image": "https://img.example.com/e2e.jpg",
        "prep_time": 20,
        "difficulty": "Easy",
        "category": "Dessert",
        "cuisine": "Italian",
        "diet": "Vegetarian",
        "serves": 2,
        "calories": 250,
        "ingredients": ["mascarpone", "espresso"],
        "instructions": ["Layer.", "Chill."]
    })
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = test_app().await;
    let (status, body) = request(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, _) = request(&app, "GET", "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_signup_login_and_credential_failures() {
    let app = test_app().await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({"full_name": "Ada", "email": "ada@example.com", "password": "hunter2hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully.");

    // Same email, different case: conflict.
    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({"full_name": "Ada2", "email": "ADA@Example.com", "password": "hunter2hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    // Missing fields.
    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({"full_name": "", "email": "x@example.com", "password": "hunter2hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Wrong password and unknown email yield the same status.
    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "ada@example.com", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "ghost@example.com", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Correct credentials, case-insensitive email.
    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "Ada@EXAMPLE.com", "password": "hunter2hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["jwt_token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_protected_routes_require_bearer_token() {
    let app = test_app().await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/recipes",
        None,
        Some(recipe_body("Tiramisu")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(
        &app,
        "POST",
        "/api/recipes",
        Some("garbage-token"),
        Some(recipe_body("Tiramisu")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(&app, "GET", "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_recipe_lifecycle_over_http() {
    let app = test_app().await;
    let owner_token = signup_and_login(&app, "Owner", "owner@example.com").await;
    let rater_token = signup_and_login(&app, "Rater", "rater@example.com").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/recipes",
        Some(&owner_token),
        Some(recipe_body("Tiramisu")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Recipe created successfully.");
    let recipe_id = body["recipe"]["id"].as_str().unwrap().to_owned();

    // Public read, owner-populated.
    let (status, body) = request(&app, "GET", &format!("/api/recipes/{recipe_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Tiramisu");
    assert_eq!(body["owner"]["email"], "owner@example.com");

    // Views increment without auth.
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/recipes/{recipe_id}/views"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["views"], 1);

    // Like and rate with the second account.
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/recipes/{recipe_id}/like"),
        Some(&rater_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Liked");
    assert_eq!(body["likes"], 1);

    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/recipes/{recipe_id}/rate"),
        Some(&rater_token),
        Some(json!({"rating": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Rating submitted.");
    assert_eq!(body["rating_count"], 1);
    assert!((body["average_rating"].as_f64().unwrap() - 5.0).abs() < f64::EPSILON);

    // Out-of-range rating: validation error.
    let (status, _) = request(
        &app,
        "POST",
        &format!("/api/recipes/{recipe_id}/rate"),
        Some(&rater_token),
        Some(json!({"rating": 9})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Non-owner update: the ambiguous 404.
    let (status, body) = request(
        &app,
        "PUT",
        &format!("/api/recipes/{recipe_id}"),
        Some(&rater_token),
        Some(json!({"title": "Hijacked"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND_OR_UNAUTHORIZED");

    // Owner update succeeds.
    let (status, body) = request(
        &app,
        "PUT",
        &format!("/api/recipes/{recipe_id}"),
        Some(&owner_token),
        Some(json!({"title": "Tiramisu Classico"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recipe"]["title"], "Tiramisu Classico");

    // Owner delete succeeds; the recipe is gone.
    let (status, body) = request(
        &app,
        "DELETE",
        &format!("/api/recipes/{recipe_id}"),
        Some(&owner_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Recipe deleted.");

    let (status, _) = request(&app, "GET", &format!("/api/recipes/{recipe_id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listing_filters_and_validation_over_http() {
    let app = test_app().await;
    let token = signup_and_login(&app, "Chef", "chef@example.com").await;

    for title in ["Chocolate Cake", "Vanilla Cake"] {
        let (status, _) = request(
            &app,
            "POST",
            "/api/recipes",
            Some(&token),
            Some(recipe_body(title)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = request(&app, "GET", "/api/recipes?search=choc", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["recipes"][0]["title"], "Chocolate Cake");
    assert_eq!(body["page"], 1);
    assert_eq!(body["pages"], 1);

    let (status, body) = request(&app, "GET", "/api/recipes?page=zero", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    let (status, _) = request(&app, "GET", "/api/recipes?page=0", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = request(&app, "GET", "/api/recipes/popular?by=views", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().is_some());
}

#[tokio::test]
async fn test_profile_and_password_reset_over_http() {
    let app = test_app().await;
    let token = signup_and_login(&app, "Mallory", "mallory@example.com").await;

    let (status, body) = request(&app, "GET", "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "mallory@example.com");
    assert_eq!(body["total_favorites"], 0);
    assert!(body.get("password_hash").is_none());

    let (status, body) = request(
        &app,
        "PUT",
        "/api/users/me",
        Some(&token),
        Some(json!({"full_name": "Mallory Q."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_name"], "Mallory Q.");

    // Password reset: unknown email 404s, known email succeeds.
    let (status, _) = request(
        &app,
        "POST",
        "/api/password/forgot",
        None,
        Some(json!({"email": "ghost@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        &app,
        "POST",
        "/api/password/forgot",
        None,
        Some(json!({"email": "mallory@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(
        &app,
        "POST",
        "/api/password/reset",
        None,
        Some(json!({"email": "mallory@example.com", "new_password": "correct-horse-battery"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Old password no longer works; the new one does.
    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "mallory@example.com", "password": "hunter2hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "mallory@example.com", "password": "correct-horse-battery"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
