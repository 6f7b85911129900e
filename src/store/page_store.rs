//! Page store implementation

use crate::error::{Error, Result};
use crate::types::Cursor;

/// Ordered cache of fetched page payloads
#[derive(Debug, Clone, Default)]
pub struct PageStore {
    /// Rendered payloads, index = ordinal - 1
    pages: Vec<String>,
    /// Cursor to use for the next fetch
    cursor: Cursor,
    /// Total page count, learned once
    total_pages: Option<usize>,
}

impl PageStore {
    /// Create an empty store positioned at the start cursor
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if page `page` (1-based) is cached
    pub fn has_page(&self, page: usize) -> bool {
        page >= 1 && page <= self.pages.len()
    }

    /// Get the payload of a cached page
    pub fn page(&self, page: usize) -> Option<&str> {
        page.checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .map(String::as_str)
    }

    /// Append the next page and replace the cursor.
    ///
    /// Returns the ordinal assigned to the new page.
    pub fn append_page(&mut self, payload: impl Into<String>, next_cursor: Cursor) -> usize {
        self.pages.push(payload.into());
        self.cursor = next_cursor;
        self.pages.len()
    }

    /// Cursor for the next fetch
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Number of cached pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if no page has been cached yet
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total page count, if known
    pub fn total_pages(&self) -> Option<usize> {
        self.total_pages
    }

    /// Record the total page count. It can only be set once.
    pub fn set_total_pages(&mut self, total: usize) -> Result<()> {
        match self.total_pages {
            Some(existing) => Err(Error::store(format!(
                "total page count already recorded as {existing}"
            ))),
            None => {
                self.total_pages = Some(total);
                Ok(())
            }
        }
    }

    /// Check if every page up to the total is cached
    pub fn is_complete(&self) -> bool {
        self.total_pages
            .is_some_and(|total| self.pages.len() >= total)
    }
}
