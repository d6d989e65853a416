//! Translate [`PageRequest`] into SQL `LIMIT`/`OFFSET` values.

use pagination::PageRequest;

/// `LIMIT` for a capped page, or `None` when the whole collection is wanted.
pub(crate) fn page_limit(page: &PageRequest) -> Option<i64> {
    page.limit()
        .map(|limit| i64::try_from(limit.get()).unwrap_or(i64::MAX))
}

/// `OFFSET` for the requested page.
pub(crate) fn page_offset(page: &PageRequest) -> i64 {
    i64::try_from(page.offset()).unwrap_or(i64::MAX)
}
