//! Page query parsing and paged response headers.
//!
//! ```text
//! GET /api/naps?page=1&size=20
//! X-Total-Count: 45
//! Link: </api/naps?page=2&size=20>; rel="next",</api/naps?page=0&size=20>; rel="prev",...
//! ```

use actix_web::HttpResponse;
use actix_web::http::header::LINK;
use pagination::{DEFAULT_PAGE_SIZE, Page, PageRequest, PaginationLinks, TOTAL_COUNT_HEADER};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::domain::Error;
use crate::inbound::http::validation::{FieldName, invalid_page_size_error};

const SIZE: FieldName = FieldName::new("size");

/// Zero-based page selection from the query string.
#[derive(Debug, Default, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page index. Defaults to 0.
    pub page: Option<u32>,
    /// Rows per page, 1 to 2000. Defaults to 20.
    pub size: Option<u32>,
}

impl PageQuery {
    /// Validate into a [`PageRequest`].
    pub fn into_request(self) -> Result<PageRequest, Error> {
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE);
        PageRequest::new(self.page.unwrap_or(0), size)
            .map_err(|err| invalid_page_size_error(SIZE, size, err))
    }
}

/// `200 OK` with the page items as a JSON array plus paging headers.
pub fn paged_response<T, U, F>(page: Page<T>, base_path: &str, to_body: F) -> HttpResponse
where
    U: Serialize,
    F: FnMut(T) -> U,
{
    let links = PaginationLinks::new(base_path).for_page(&page);
    let total = page.total();
    let body: Vec<U> = page.into_items().into_iter().map(to_body).collect();
    HttpResponse::Ok()
        .insert_header((TOTAL_COUNT_HEADER, total.to_string()))
        .insert_header((LINK, links.header_value()))
        .json(body)
}
