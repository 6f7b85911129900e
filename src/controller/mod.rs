//! Pagination controller module
//!
//! Orchestrates a paginated table: learns the page count, keeps the marker
//! window in sync with the active page, renders pages through a `PageView`
//! and preloads the rest of the table in the background.
//!
//! # Overview
//!
//! - `PaginationController::init` - total pages, initial markers, page 1,
//!   then background preload
//! - `PaginationController::select_page` - user picked a page marker
//! - `PaginationController::render_page` - show a page, fetching up to it
//!   in cursor order if needed

mod pagination;
mod view;

pub use pagination::PaginationController;
pub use view::PageView;
