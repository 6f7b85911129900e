//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Random-access pagination over cursor-only paged backends
#[derive(Parser, Debug)]
#[command(name = "cursor-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Table configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URI of the paginated table (overrides the config file)
    #[arg(short, long, global = true)]
    pub base_uri: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute which page markers are visible
    Markers {
        /// Total number of pages
        #[arg(long)]
        total: usize,

        /// Active page
        #[arg(long, default_value = "1")]
        current: usize,

        /// Use the first-render window instead of a centered one
        #[arg(long)]
        initial: bool,

        /// Maximum number of visible markers
        #[arg(long, default_value = "11")]
        max_markers: usize,

        /// Markers on each side of the active page
        #[arg(long, default_value = "5")]
        side_span: usize,
    },

    /// Render the table in the terminal
    Browse {
        /// Pages to select after the first one is shown (comma-separated)
        #[arg(long, value_delimiter = ',')]
        select: Vec<usize>,
    },

    /// Fetch every page and print a summary
    Preload,
}
