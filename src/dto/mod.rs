//! JSON shapes exposed by the API, camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::repository::Pagination;

pub mod auth;
pub mod bonus;
pub mod cart;
pub mod keypoint;
pub mod problem;
pub mod purchase;
pub mod replacement;
pub mod review;
pub mod tour;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Envelope for paginated list responses.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub results: Vec<T>,
    pub total_count: usize,
}

impl<T> PagedResult<T> {
    #[must_use]
    pub fn new(total_count: usize, results: Vec<T>) -> Self {
        Self {
            results,
            total_count,
        }
    }
}

/// `page` / `pageSize` query parameters of list endpoints. `page` is
/// 0-based.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl PageQuery {
    /// Applies defaults and clamps the page size to the server maximum.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page.unwrap_or(0),
            per_page: self
                .page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }
}

/// Error body the client reads messages from.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub errors: Vec<String>,
}

impl ErrorBody {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }
}
