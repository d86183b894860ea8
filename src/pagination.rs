// ABOUTME: Offset pagination descriptor for recipe listings
// ABOUTME: Parses and validates page/limit request parameters and computes the envelope math
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! Offset-based pagination for listing endpoints.
//!
//! `page` is 1-indexed with a default of 1; `limit` defaults to 10 and is
//! capped at [`MAX_LIMIT`]. Non-numeric and non-positive values are rejected
//! with a validation error rather than producing a nonsense offset.

use crate::errors::{AppError, AppResult};

/// Default page when the parameter is absent
pub const DEFAULT_PAGE: i64 = 1;
/// Default page size when the parameter is absent
pub const DEFAULT_LIMIT: i64 = 10;
/// Upper bound on the page size
pub const MAX_LIMIT: i64 = 100;

/// A validated pagination descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-indexed page number
    pub page: i64,
    /// Page size
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Parse pagination from raw query parameters.
    ///
    /// # Errors
    /// Returns a validation error when either parameter is present but not a
    /// positive integer.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> AppResult<Self> {
        let page = match page {
            Some(raw) => parse_positive("page", raw)?,
            None => DEFAULT_PAGE,
        };
        let limit = match limit {
            Some(raw) => parse_positive("limit", raw)?.min(MAX_LIMIT),
            None => DEFAULT_LIMIT,
        };
        Ok(Self { page, limit })
    }

    /// Number of items skipped before this page
    #[must_use]
    pub const fn skip(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Total number of pages for `total` matching items
    #[must_use]
    pub const fn pages(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + self.limit - 1) / self.limit
        }
    }
}

fn parse_positive(name: &str, raw: &str) -> AppResult<i64> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::validation(format!("{name} must be a positive integer")))?;
    if value < 1 {
        return Err(AppError::validation(format!(
            "{name} must be a positive integer"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let p = Pagination::from_params(None, None).unwrap();
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 10);
        assert_eq!(p.skip(), 0);
    }

    #[test]
    fn test_skip_math() {
        let p = Pagination::from_params(Some("2"), Some("10")).unwrap();
        assert_eq!(p.skip(), 10);

        let p = Pagination::from_params(Some("4"), Some("25")).unwrap();
        assert_eq!(p.skip(), 75);
    }

    #[test]
    fn test_pages_is_ceiling_of_total_over_limit() {
        let p = Pagination::from_params(Some("2"), Some("10")).unwrap();
        assert_eq!(p.pages(25), 3);
        assert_eq!(p.pages(30), 3);
        assert_eq!(p.pages(31), 4);
        assert_eq!(p.pages(0), 0);
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert!(Pagination::from_params(Some("abc"), None).is_err());
        assert!(Pagination::from_params(None, Some("ten")).is_err());
        assert!(Pagination::from_params(Some("1.5"), None).is_err());
    }

    #[test]
    fn test_non_positive_rejected() {
        assert!(Pagination::from_params(Some("0"), None).is_err());
        assert!(Pagination::from_params(Some("-1"), None).is_err());
        assert!(Pagination::from_params(None, Some("0")).is_err());
    }

    #[test]
    fn test_limit_is_capped() {
        let p = Pagination::from_params(None, Some("5000")).unwrap();
        assert_eq!(p.limit, MAX_LIMIT);
    }
}
