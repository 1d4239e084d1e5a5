//! Validated page requests.

use serde::{Deserialize, Serialize};

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on the number of rows a single page may hold.
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// The requested page size was zero.
    #[error("page size must be greater than zero")]
    ZeroSize,
    /// The requested page size exceeded [`MAX_PAGE_SIZE`].
    #[error("page size must be at most {max}, got {requested}")]
    SizeTooLarge {
        /// Largest accepted size.
        max: u32,
        /// Size supplied by the caller.
        requested: u32,
    },
}

/// Zero-based page number plus page size.
///
/// ## Invariants
/// - `size` lies in `1..=MAX_PAGE_SIZE`.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(2, 25).expect("valid request");
/// assert_eq!(request.offset(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest", into = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Validate and build a page request.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `size` is zero or above
    /// [`MAX_PAGE_SIZE`].
    pub const fn new(page: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        if size > MAX_PAGE_SIZE {
            return Err(PageRequestError::SizeTooLarge {
                max: MAX_PAGE_SIZE,
                requested: size,
            });
        }
        Ok(Self { page, size })
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of rows on this page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of rows preceding this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        // Both factors fit in 32 bits, so the product fits in 64.
        (self.page as u64) * (self.size as u64)
    }

    /// Request for another page number with the same size.
    #[must_use]
    pub const fn with_page(self, page: u32) -> Self {
        Self {
            page,
            size: self.size,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawPageRequest {
    page: u32,
    size: u32,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(value.page, value.size)
    }
}

impl From<PageRequest> for RawPageRequest {
    fn from(value: PageRequest) -> Self {
        Self {
            page: value.page,
            size: value.size,
        }
    }
}
