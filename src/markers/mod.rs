//! Page marker window module
//!
//! Computes which page numbers get a visible marker for a given total page
//! count, active page and marker budget. Pure functions, no I/O.
//!
//! # Overview
//!
//! - `MarkerWindow::initial` - first render, pages `1..=max_markers`
//! - `MarkerWindow::centered` - recentered on the active page, clamped
//!   against both edges without shrinking

mod window;

pub use window::MarkerWindow;

#[cfg(test)]
mod tests;
