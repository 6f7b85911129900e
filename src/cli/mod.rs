//! CLI module
//!
//! Command-line interface for driving a paginated table.
//!
//! # Commands
//!
//! - `markers` - Compute a marker window (no network)
//! - `browse` - Render pages in the terminal, following page selections
//! - `preload` - Fetch every page and print a summary

mod commands;
mod runner;
mod view;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use view::{format_marker_bar, TerminalView};
