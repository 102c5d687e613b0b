//! Pagination and sorting types for record search.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

use super::record::RecordField;

/// Sort direction for ordered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// The SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(SearchError::InvalidSortDirection {
                direction: other.to_string(),
            }),
        }
    }
}

/// The pagination half of a search request.
///
/// `page` is 1-based and `limit` is the page size; both are at least 1.
/// When `sort_field` is `None` the store orders by `created_at` descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<RecordField>,
    pub sort_direction: SortDirection,
}

impl PageRequest {
    /// Creates a page request with no explicit sort.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidPagination` if `page` or `limit` is zero.
    pub fn new(page: u32, limit: u32) -> Result<Self, SearchError> {
        if page == 0 {
            return Err(SearchError::InvalidPagination {
                message: "page must be at least 1".to_string(),
            });
        }
        if limit == 0 {
            return Err(SearchError::InvalidPagination {
                message: "limit must be at least 1".to_string(),
            });
        }
        Ok(Self {
            page,
            limit,
            sort_field: None,
            sort_direction: SortDirection::Desc,
        })
    }

    /// Sets the sort field and direction.
    pub fn with_sort(mut self, field: RecordField, direction: SortDirection) -> Self {
        self.sort_field = Some(field);
        self.sort_direction = direction;
        self
    }

    /// Sets only the direction, leaving the field as is.
    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = direction;
        self
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// `ceil(total / limit)`; zero when there are no matches.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.limit.max(1)))
    }
}
