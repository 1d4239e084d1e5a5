//! A page of results together with the total row count.

use crate::request::PageRequest;

/// One page of items returned by a store.
///
/// # Examples
/// ```
/// use pagination::{Page, PageRequest};
///
/// let page = Page::new(vec![1, 2], 3, PageRequest::new(0, 2).expect("valid"));
/// assert!(page.has_next());
/// assert!(!page.has_previous());
/// assert_eq!(page.map(|n| n * 10).into_items(), vec![10, 20]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    items: Vec<T>,
    total: u64,
    request: PageRequest,
}

impl<T> Page<T> {
    /// Build a page from the rows of one window and the total row count.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    /// Page with no rows and a zero total.
    #[must_use]
    pub const fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Total number of rows across every page.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// The request this page answers.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Number of pages needed to hold `total` rows.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.request.size() as u64)
    }

    /// Index of the final page, or zero when there are no rows.
    #[must_use]
    pub fn last_page(&self) -> u32 {
        u32::try_from(self.total_pages().saturating_sub(1)).unwrap_or(u32::MAX)
    }

    /// Whether a page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        (self.request.page() as u64) + 1 < self.total_pages()
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.request.page() > 0
    }

    /// Transform every item while keeping the paging metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }

    /// Fallible variant of [`Page::map`].
    ///
    /// # Errors
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E, F>(self, f: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Page {
            items,
            total: self.total,
            request: self.request,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Page arithmetic at the boundaries.
    use super::*;
    use rstest::rstest;

    fn request(page: u32, size: u32) -> PageRequest {
        PageRequest::new(page, size).expect("valid request")
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(20, 1)]
    #[case(21, 2)]
    #[case(40, 2)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] expected: u64) {
        let page: Page<()> = Page::new(Vec::new(), total, request(0, 20));
        assert_eq!(page.total_pages(), expected);
    }

    #[rstest]
    fn empty_page_has_no_neighbours() {
        let page: Page<u8> = Page::empty(request(0, 20));
        assert!(!page.has_next());
        assert!(!page.has_previous());
        assert_eq!(page.last_page(), 0);
    }

    #[rstest]
    fn middle_page_has_both_neighbours() {
        let page = Page::new(vec![5, 6], 10, request(2, 2));
        assert!(page.has_next());
        assert!(page.has_previous());
        assert_eq!(page.last_page(), 4);
    }

    #[rstest]
    fn try_map_stops_at_first_error() {
        let page = Page::new(vec![1, -1, 2], 3, request(0, 3));
        let result: Result<Page<u32>, String> =
            page.try_map(|n| u32::try_from(n).map_err(|_| format!("negative: {n}")));
        assert_eq!(result, Err("negative: -1".to_owned()));
    }
}
