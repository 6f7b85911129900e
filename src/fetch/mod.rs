//! Fetch serializer module
//!
//! Guarantees at most one page fetch in flight per table. Every fetch uses
//! the cursor left behind by the previous one, so two concurrent fetches would
//! reuse a cursor and duplicate or skip pages.
//!
//! # Overview
//!
//! - `FetchSerializer::ensure_loaded` - request one more page; returns a
//!   `LoadTicket` that resolves once that fetch has been committed
//! - Requests arriving while a fetch is in flight are queued and served
//!   strictly in arrival order by a single driver task
//! - A transport failure or malformed response stalls the serializer for good

mod serializer;

pub use serializer::{FetchPhase, FetchSerializer, LoadOutcome, LoadTicket};
