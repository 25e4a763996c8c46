//! Offset-based pagination utilities.

use serde::{Deserialize, Serialize};

/// Default items per page.
pub const DEFAULT_PER_PAGE: i64 = 50;

/// Maximum items per page.
pub const MAX_PER_PAGE: i64 = 100;

/// Query parameters for paginated list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// Page number (1-indexed, default: 1).
    pub page: Option<i64>,

    /// Items per page (default: 50, max: 100).
    pub per_page: Option<i64>,
}

impl PageQuery {
    /// Get the page number (1-indexed).
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Get items per page (clamped to 1-100).
    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    /// Get the row offset for the current page.
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }
}

/// Pagination metadata included in list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Builds pagination metadata from query values and a total count.
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), DEFAULT_PER_PAGE);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_page_query_clamps_per_page() {
        let query = PageQuery {
            page: Some(2),
            per_page: Some(1000),
        };
        assert_eq!(query.per_page(), MAX_PER_PAGE);
        assert_eq!(query.offset(), MAX_PER_PAGE);
    }

    #[test]
    fn test_page_query_rejects_zero_page() {
        let query = PageQuery {
            page: Some(0),
            per_page: Some(0),
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), 1);
    }

    #[test]
    fn test_pagination_total_pages() {
        let p = Pagination::new(1, 50, 101);
        assert_eq!(p.total_pages, 3);

        let p = Pagination::new(1, 50, 100);
        assert_eq!(p.total_pages, 2);

        let p = Pagination::new(1, 50, 0);
        assert_eq!(p.total_pages, 0);
    }

    #[test]
    fn test_pagination_serializes_snake_case() {
        let p = Pagination::new(2, 25, 60);
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"per_page\":25"));
        assert!(json.contains("\"total_pages\":3"));
    }
}
