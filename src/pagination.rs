//! This modules defines the common functionality for paging data.

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum number of items per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// The `LIMIT` and `OFFSET` of a page in a SQL query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// The maximum number of rows to return. A negative limit means no limit.
    pub limit: i64,
    /// The number of rows to skip.
    pub offset: i64,
}

impl PageWindow {
    /// The window for the 1-based `page` with `page_size` items per page.
    ///
    /// Page 0 is treated as the first page, and a `page_size` of 0 means the
    /// page holds every remaining item.
    pub fn new(page: u64, page_size: u64) -> Self {
        let limit = if page_size == 0 {
            -1
        } else {
            i64::try_from(page_size).unwrap_or(i64::MAX)
        };

        let offset = page
            .saturating_sub(1)
            .saturating_mul(page_size)
            .min(i64::MAX as u64) as i64;

        Self { limit, offset }
    }
}
