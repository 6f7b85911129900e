//! Page store module
//!
//! Append-only cache of fetched pages plus the cursor for the next fetch.
//!
//! # Overview
//!
//! Pages are keyed by their 1-based ordinal in fetch order. Ordinals stay
//! contiguous from 1 and nothing is ever evicted, so once `has_page(p)` is
//! true it stays true.

mod page_store;

pub use page_store::PageStore;
