//! Translation between [`PageRequest`] and SQL `LIMIT`/`OFFSET` values.

use pagination::PageRequest;

/// `(limit, offset)` for a page request.
pub(crate) fn limit_offset(page: PageRequest) -> (i64, i64) {
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
    (i64::from(page.size()), offset)
}

/// `COUNT(*)` result as an unsigned total.
pub(crate) fn total_from_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}
