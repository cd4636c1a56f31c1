//! Shared pagination utilities
//!
//! Provides the page request and `{data, pagination}` envelope used by list
//! queries.
//!
//! # Examples
//!
//! ```rust,ignore
//! use hamlet_server::features::shared::pagination::{PageRequest, Paginated};
//!
//! let request = PageRequest::new(2, 20);
//! let offset = request.offset();
//!
//! // After fetching rows and the total count...
//! let page = Paginated::new(rows, &request, total);
//! ```

use serde::{Deserialize, Serialize};

/// Default page size for list queries.
pub const DEFAULT_LIMIT: i64 = 20;

/// Largest page size a client can get; larger requests are capped.
pub const MAX_LIMIT: i64 = 100;

/// A validated page request (1-indexed page, capped limit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Create a page request, clamping page to at least 1 and limit to 1-100
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Calculate the offset for SQL OFFSET clause, saturating on huge pages
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Pagination metadata for response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    /// Total number of matching items
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl PaginationMetadata {
    pub fn new(request: &PageRequest, total: i64) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            (total + request.limit - 1) / request.limit
        };

        Self {
            total,
            page: request.page,
            limit: request.limit,
            total_pages,
        }
    }
}

/// Wrapper for paginated list responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Items for the current page
    pub data: Vec<T>,
    pub pagination: PaginationMetadata,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, request: &PageRequest, total: i64) -> Self {
        Self {
            data,
            pagination: PaginationMetadata::new(request, total),
        }
    }
}
