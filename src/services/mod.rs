// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Services own an injected store handle and are reusable across transports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! Domain service layer
//!
//! Protocol-agnostic business logic extracted from route handlers. Each
//! service receives the store adapter by injection at construction, so the
//! same rules apply regardless of the entry point.

/// Like toggling and view counting
pub mod engagement;

/// Rating submission and aggregate recomputation
pub mod ratings;

/// Recipe CRUD, listing, and ownership checks
pub mod recipes;

/// Own-profile read and update
pub mod users;
