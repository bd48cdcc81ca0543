//! Page-number pagination.
//!
//! List endpoints accept `?page=` (1-based) and `?limit=` query parameters.
//! Out-of-range values are clamped rather than rejected, so `page=0` reads the
//! first page and `limit=1000` is capped at [`MAX_LIMIT`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;

/// Clamp raw query parameters into an effective `(page, limit)` pair.
///
/// `page` defaults to 1 and is floored at 1; `limit` defaults to
/// [`DEFAULT_LIMIT`] and is clamped into `1..=MAX_LIMIT`.
#[must_use]
pub fn clamp(page: Option<u64>, limit: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    (page, limit)
}

/// Row offset for a clamped `(page, limit)` pair.
#[must_use]
pub fn offset(page: u64, limit: u64) -> u64 {
    (page - 1) * limit
}

/// Pagination metadata returned alongside every list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// A page of results plus its [`Pagination`] metadata.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    /// Wrap one page of rows. `totalPages` is `ceil(total / limit)`, so an
    /// empty table reports zero pages.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        Self {
            items,
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages: total.div_ceil(limit.max(1)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        assert_eq!(clamp(None, None), (1, DEFAULT_LIMIT));
    }

    #[test]
    fn test_page_floored_at_one() {
        assert_eq!(clamp(Some(0), Some(10)), (1, 10));
    }

    #[test]
    fn test_limit_clamped_to_max() {
        assert_eq!(clamp(Some(2), Some(1000)), (2, MAX_LIMIT));
    }

    #[test]
    fn test_limit_floored_at_one() {
        assert_eq!(clamp(Some(1), Some(0)), (1, 1));
    }

    #[test]
    fn test_offset_calculation() {
        assert_eq!(offset(1, 20), 0);
        assert_eq!(offset(2, 20), 20);
        assert_eq!(offset(5, 7), 28);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        let page: Paginated<u8> = Paginated::new(vec![], 25, 1, 10);
        assert_eq!(page.pagination.total_pages, 3);

        let page: Paginated<u8> = Paginated::new(vec![], 30, 1, 10);
        assert_eq!(page.pagination.total_pages, 3);

        let page: Paginated<u8> = Paginated::new(vec![], 0, 1, 10);
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[test]
    fn test_total_pages_for_various_limits() {
        for limit in [3u64, 7, 10, 100] {
            let total = 25u64;
            let page: Paginated<u8> = Paginated::new(vec![], total, 1, limit);
            assert_eq!(
                page.pagination.total_pages,
                total.div_ceil(limit),
                "totalPages must be ceil(total/limit) for limit {limit}"
            );
        }
    }
}
