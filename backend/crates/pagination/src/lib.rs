//! Page-number pagination primitives shared by napchart endpoints.
//!
//! Requests address a zero-based page of a fixed size. Stores answer with a
//! [`Page`] carrying the items and the total row count, and inbound adapters
//! turn that page into `X-Total-Count` and `Link` response headers through
//! [`PaginationLinks`].
//!
//! ```
//! use pagination::{Page, PageRequest, PaginationLinks};
//!
//! let request = PageRequest::new(1, 2).expect("valid request");
//! let page = Page::new(vec!["c", "d"], 5, request);
//! assert_eq!(page.total_pages(), 3);
//!
//! let links = PaginationLinks::new("/api/naps").for_page(&page);
//! assert!(links.header_value().contains("rel=\"next\""));
//! ```

mod links;
mod page;
mod request;

pub use links::{LinkRelation, PaginationLinks, PageLinks};
pub use page::Page;
pub use request::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, PageRequestError};

/// Response header carrying the total number of rows across all pages.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";
