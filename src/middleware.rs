// ABOUTME: Authentication middleware for HTTP routes
// ABOUTME: Bearer-token extractor yielding the authenticated caller's identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! Request authentication.
//!
//! [`AuthedUser`] is an axum extractor: handlers that take it as an
//! argument only run for requests carrying a valid `Authorization: Bearer`
//! token. Missing or invalid tokens are rejected with the auth error
//! taxonomy before the handler body executes.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use uuid::Uuid;

use crate::context::ServerResources;
use crate::errors::AppError;

/// The authenticated caller, decoded from a bearer token
#[derive(Debug, Clone)]
pub struct AuthedUser {
    /// Caller's user ID
    pub user_id: Uuid,
    /// Caller's email, as recorded in the token
    pub email: String,
}

#[async_trait]
impl FromRequestParts<Arc<ServerResources>> for AuthedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ServerResources>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::auth_required())?;

        let claims = state.auth.validate_token(bearer.token())?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Token subject is not a valid user id"))?;

        Ok(Self {
            user_id,
            email: claims.email,
        })
    }
}
