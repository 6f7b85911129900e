//! CLI runner - executes commands

use super::view::TerminalView;
use crate::cli::commands::{Cli, Commands};
use crate::config::{load_config, MarkerConfig, TableConfig};
use crate::controller::PaginationController;
use crate::error::{Error, Result, ResultExt};
use crate::markers::MarkerWindow;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Markers {
                total,
                current,
                initial,
                max_markers,
                side_span,
            } => self.markers(
                *total,
                *current,
                *initial,
                MarkerConfig::new(*max_markers, *side_span),
            ),
            Commands::Browse { select } => self.browse(select).await,
            Commands::Preload => self.preload().await,
        }
    }

    /// Print the marker window as JSON
    fn markers(
        &self,
        total: usize,
        current: usize,
        initial: bool,
        budget: MarkerConfig,
    ) -> Result<()> {
        budget.validate()?;

        let window = if initial {
            MarkerWindow::initial(total, &budget)
        } else {
            if current == 0 || current > total {
                return Err(Error::OutOfRangeSelection {
                    page: current,
                    total_pages: total,
                });
            }
            MarkerWindow::centered(total, current, &budget)
        };

        println!("{}", serde_json::to_string_pretty(&window)?);
        Ok(())
    }

    /// Show the first page, then each selected page in turn
    async fn browse(&self, select: &[usize]) -> Result<()> {
        let config = self.table_config()?;
        let controller = PaginationController::with_http(config, Arc::new(TerminalView::new()))?;

        controller.init().await?;
        for &page in select {
            controller.select_page(page).await?;
        }

        let loaded = controller.wait_for_preload().await?;
        info!("Browsing finished with {} pages cached", loaded);
        Ok(())
    }

    /// Preload the whole table and print a summary
    async fn preload(&self) -> Result<()> {
        let config = self.table_config()?;
        let controller =
            PaginationController::with_http(config, Arc::new(TerminalView::markers_only()))?;

        let start = Instant::now();
        controller.init().await?;
        let loaded = controller.wait_for_preload().await?;

        let summary = json!({
            "base_uri": controller.config().base_uri,
            "total_pages": controller.total_pages(),
            "loaded_pages": loaded,
            "fetches": controller.serializer().fetches_issued(),
            "elapsed_ms": start.elapsed().as_millis() as u64,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }

    /// Build the table config from `--config` and/or `--base-uri`
    fn table_config(&self) -> Result<TableConfig> {
        let mut config = match (&self.cli.config, &self.cli.base_uri) {
            (Some(path), _) => load_config(path)
                .context(format!("Failed to load config '{}'", path.display()))?,
            (None, Some(base_uri)) => TableConfig::new(base_uri.clone()),
            (None, None) => {
                return Err(Error::config(
                    "Either --config or --base-uri must be provided",
                ))
            }
        };

        if let Some(base_uri) = &self.cli.base_uri {
            config.base_uri.clone_from(base_uri);
        }
        config.validate()?;
        Ok(config)
    }
}
