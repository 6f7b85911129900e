//! # cursor-pager
//!
//! Random-access pagination over backends that can only be read with a
//! cursor.
//!
//! The backend hands out pages strictly in cursor order, while the user may
//! click any page marker at any time. This crate reconciles the two: fetches
//! are serialized so each one uses the cursor left by the previous fetch,
//! fetched pages are cached for the lifetime of the table, the remaining pages
//! are preloaded in the background, and a bounded window of page markers
//! follows the active page.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cursor_pager::{PaginationController, TableConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> cursor_pager::Result<()> {
//!     let config = TableConfig::new("https://example.com/memberlist");
//!     let controller = PaginationController::with_http(config, Arc::new(MyView))?;
//!
//!     // Page count, first markers, page 1, then background preload
//!     controller.init().await?;
//!
//!     // User clicked the marker for page 9
//!     controller.select_page(9).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   PaginationController                      │
//! │   init()    select_page(p)    render_page(p)    preload     │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │                              │
//!     ┌──────────┴──────────┐        ┌──────────┴──────────┐
//!     │    MarkerWindow     │        │   FetchSerializer   │
//!     │  (pure: total,      │        │  one fetch in flight│
//!     │   current, budget)  │        │  FIFO deferred queue│
//!     └─────────────────────┘        └───┬─────────────┬───┘
//!                                        │             │
//!                               ┌────────┴───┐  ┌──────┴────────┐
//!                               │ PageStore  │  │ PageTransport │
//!                               │ pages +    │  │ HTTP + retry  │
//!                               │ cursor     │  │ rate limiting │
//!                               └────────────┘  └───────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types (cursor, backoff)
pub mod types;

/// Table configuration and loading
pub mod config;

/// Cache of fetched pages
pub mod store;

/// Serialized, cursor-ordered page fetching
pub mod fetch;

/// Page marker window calculation
pub mod markers;

/// Orchestration of a paginated table
pub mod controller;

/// Backend abstraction and HTTP implementation
pub mod transport;

/// HTTP client with retry and rate limiting
pub mod http;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{load_config, load_config_from_str, HttpConfig, MarkerConfig, TableConfig};
pub use controller::{PageView, PaginationController};
pub use error::{Error, Result};
pub use fetch::{FetchPhase, FetchSerializer, LoadOutcome, LoadTicket};
pub use markers::MarkerWindow;
pub use store::PageStore;
pub use transport::{HttpTransport, PageResponse, PageTransport};
pub use types::{BackoffType, Cursor};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
