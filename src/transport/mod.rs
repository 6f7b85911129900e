//! Page transport module
//!
//! The serializer and controller only talk to the backend through the
//! `PageTransport` trait:
//!
//! - `total_pages` - number of pages, asked once per table
//! - `fetch_page` - next page for a cursor, `start` for the first one
//!
//! `HttpTransport` speaks the list-page wire protocol over HTTP.

mod http;
mod types;

pub use http::HttpTransport;
pub use types::{PageResponse, PageTransport};

#[cfg(test)]
pub(crate) mod stub;
