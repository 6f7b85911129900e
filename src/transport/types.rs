//! Transport types and traits

use crate::error::{Error, Result};
use crate::types::Cursor;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One page as returned by the backend.
///
/// Both fields are optional on the wire so that an incomplete response can be
/// rejected by the serializer instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    /// Rendered page payload
    #[serde(rename = "html", default)]
    pub content: Option<String>,
    /// Cursor for the page after this one
    #[serde(rename = "nextPage", default)]
    pub next_cursor: Option<String>,
}

impl PageResponse {
    /// Create a complete response
    pub fn new(content: impl Into<String>, next_cursor: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            next_cursor: Some(next_cursor.into()),
        }
    }

    /// Split into payload and next cursor, or fail if either is missing
    pub fn into_parts(self) -> Result<(String, Cursor)> {
        match (self.content, self.next_cursor) {
            (Some(content), Some(next)) => Ok((content, Cursor::from(next))),
            (None, _) => Err(Error::malformed("response is missing 'html'")),
            (_, None) => Err(Error::malformed("response is missing 'nextPage'")),
        }
    }
}

/// Backend that yields pages strictly in cursor order
#[async_trait]
pub trait PageTransport: Send + Sync {
    /// Total number of pages behind `base_uri`
    async fn total_pages(&self, base_uri: &str) -> Result<usize>;

    /// Fetch the page that follows `cursor`
    async fn fetch_page(&self, base_uri: &str, cursor: &Cursor) -> Result<PageResponse>;
}
