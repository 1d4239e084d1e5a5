//! RFC 8288 `Link` header generation for paged collections.

use std::fmt;

use url::form_urlencoded;

use crate::page::Page;

/// Relation names emitted in the `Link` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkRelation {
    /// The page after the current one.
    Next,
    /// The page before the current one.
    Prev,
    /// The final page.
    Last,
    /// The first page.
    First,
}

impl LinkRelation {
    /// Relation token as written in the header.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
            Self::Last => "last",
            Self::First => "first",
        }
    }
}

impl fmt::Display for LinkRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Link builder bound to the path of one collection endpoint.
///
/// # Examples
/// ```
/// use pagination::{LinkRelation, Page, PageRequest, PaginationLinks};
///
/// let page: Page<u8> = Page::new(vec![], 45, PageRequest::new(1, 20).expect("valid"));
/// let links = PaginationLinks::new("/api/naps").for_page(&page);
/// assert_eq!(links.get(LinkRelation::Last), Some("/api/naps?page=2&size=20"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationLinks {
    base_path: String,
}

impl PaginationLinks {
    /// Bind links to a collection path such as `/api/naps`.
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Compute the neighbour links for `page`.
    ///
    /// `next` and `prev` appear only when such a page exists; `last` and
    /// `first` are always present.
    #[must_use]
    pub fn for_page<T>(&self, page: &Page<T>) -> PageLinks {
        let request = page.request();
        let size = request.size();
        let mut links = Vec::with_capacity(4);
        if page.has_next() {
            links.push((LinkRelation::Next, self.href(request.page().saturating_add(1), size)));
        }
        if page.has_previous() {
            links.push((LinkRelation::Prev, self.href(request.page() - 1, size)));
        }
        links.push((LinkRelation::Last, self.href(page.last_page(), size)));
        links.push((LinkRelation::First, self.href(0, size)));
        PageLinks { links }
    }

    fn href(&self, page: u32, size: u32) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("page", &page.to_string())
            .append_pair("size", &size.to_string())
            .finish();
        format!("{}?{query}", self.base_path)
    }
}

/// Links computed for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    links: Vec<(LinkRelation, String)>,
}

impl PageLinks {
    /// Target of the given relation, if emitted.
    #[must_use]
    pub fn get(&self, relation: LinkRelation) -> Option<&str> {
        self.links
            .iter()
            .find(|(rel, _)| *rel == relation)
            .map(|(_, href)| href.as_str())
    }

    /// Render the `Link` header value.
    #[must_use]
    pub fn header_value(&self) -> String {
        self.links
            .iter()
            .map(|(rel, href)| format!("<{href}>; rel=\"{rel}\""))
            .collect::<Vec<_>>()
            .join(",")
    }
}
