//! Pagination controller implementation

use super::view::PageView;
use crate::config::TableConfig;
use crate::error::{Error, Result};
use crate::fetch::{FetchSerializer, LoadTicket};
use crate::markers::MarkerWindow;
use crate::transport::{HttpTransport, PageTransport};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// A render that has been requested but not displayed yet
struct PendingRender {
    page: usize,
    seq: u64,
    ticket: Option<LoadTicket>,
}

/// Drives one paginated table
pub struct PaginationController {
    config: TableConfig,
    transport: Arc<dyn PageTransport>,
    serializer: FetchSerializer,
    view: Arc<dyn PageView>,
    /// Set by the first `init` call before it asks for the page count
    init_claimed: AtomicBool,
    /// Active page, 0 before init
    active_page: AtomicUsize,
    /// Sequence number of the latest render request
    render_seq: AtomicU64,
    preload: Mutex<Option<JoinHandle<Result<usize>>>>,
}

impl PaginationController {
    /// Create a controller for `config` using the given transport and view
    pub fn new(
        config: TableConfig,
        transport: Arc<dyn PageTransport>,
        view: Arc<dyn PageView>,
    ) -> Result<Self> {
        config.validate()?;
        let serializer = FetchSerializer::new(config.base_uri.clone(), transport.clone());

        Ok(Self {
            config,
            transport,
            serializer,
            view,
            init_claimed: AtomicBool::new(false),
            active_page: AtomicUsize::new(0),
            render_seq: AtomicU64::new(0),
            preload: Mutex::new(None),
        })
    }

    /// Create a controller that talks HTTP according to `config.http`
    pub fn with_http(config: TableConfig, view: Arc<dyn PageView>) -> Result<Self> {
        let transport = HttpTransport::from_config(config.http.clone())?;
        Self::new(config, Arc::new(transport), view)
    }

    /// Learn the page count, show the first markers and page 1, and start
    /// preloading the rest of the table in the background.
    ///
    /// Returns once page 1 has been displayed. Only one call gets to ask the
    /// backend for the page count; any other returns `AlreadyInitialized`,
    /// unless that request failed, in which case `init` may be called again.
    pub async fn init(&self) -> Result<()> {
        if self.init_claimed.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyInitialized);
        }

        let total = match self.transport.total_pages(&self.config.base_uri).await {
            Ok(total) => total,
            Err(e) => {
                self.init_claimed.store(false, Ordering::SeqCst);
                return Err(e);
            }
        };
        self.serializer
            .set_total_pages(total)
            .map_err(|_| Error::AlreadyInitialized)?;
        info!("Table {} has {} pages", self.config.base_uri, total);

        let window = MarkerWindow::initial(total, &self.config.markers);
        self.view.show_markers(&window);

        if total == 0 {
            return Ok(());
        }

        self.active_page.store(1, Ordering::SeqCst);
        // Page 1 gets the first fetch; the preload queues behind it.
        let first = self.begin_render(1);
        self.start_preload();
        self.finish_render(first).await
    }

    /// Handle the user picking page `page`.
    ///
    /// Returns `false` without doing anything if `page` is already active.
    pub async fn select_page(&self, page: usize) -> Result<bool> {
        let total = self.require_total()?;
        check_range(page, total)?;

        if self.active_page.load(Ordering::SeqCst) == page {
            debug!("Page {} is already active", page);
            return Ok(false);
        }

        self.active_page.store(page, Ordering::SeqCst);
        let window = MarkerWindow::centered(total, page, &self.config.markers);
        self.view.show_markers(&window);

        let pending = self.begin_render(page);
        self.finish_render(pending).await?;
        Ok(true)
    }

    /// Display page `page`, fetching every page before it first if needed.
    ///
    /// If another render is requested before this one finishes, this one is
    /// dropped without touching the view.
    pub async fn render_page(&self, page: usize) -> Result<()> {
        let total = self.require_total()?;
        check_range(page, total)?;

        let pending = self.begin_render(page);
        self.finish_render(pending).await
    }

    /// Wait for the background preload to finish.
    ///
    /// Returns the number of cached pages.
    pub async fn wait_for_preload(&self) -> Result<usize> {
        let handle = self
            .preload
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match handle {
            Some(handle) => handle
                .await
                .map_err(|e| Error::Other(format!("Preload task failed: {e}")))?,
            None => Ok(self.serializer.loaded_pages()),
        }
    }

    /// Active page, if initialized and the table is not empty
    pub fn active_page(&self) -> Option<usize> {
        match self.active_page.load(Ordering::SeqCst) {
            0 => None,
            page => Some(page),
        }
    }

    /// Total page count, if initialized
    pub fn total_pages(&self) -> Option<usize> {
        self.serializer.total_pages()
    }

    /// Number of cached pages
    pub fn loaded_pages(&self) -> usize {
        self.serializer.loaded_pages()
    }

    /// Check if page `page` is cached
    pub fn has_page(&self, page: usize) -> bool {
        self.serializer.has_page(page)
    }

    /// The fetch serializer shared by renders and the preload
    pub fn serializer(&self) -> &FetchSerializer {
        &self.serializer
    }

    /// Table configuration
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    fn require_total(&self) -> Result<usize> {
        self.serializer.total_pages().ok_or(Error::NotInitialized)
    }

    /// Show the loading indicator and, if `page` is missing, queue a fetch
    /// right away so it keeps its place in line.
    fn begin_render(&self, page: usize) -> PendingRender {
        let seq = self.render_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.view.show_loading();

        let ticket = if self.serializer.has_page(page) {
            None
        } else {
            Some(self.serializer.ensure_loaded())
        };

        PendingRender { page, seq, ticket }
    }

    async fn finish_render(&self, pending: PendingRender) -> Result<()> {
        let PendingRender { page, seq, ticket } = pending;

        // Each load only moves the frontier by one page.
        if let Some(ticket) = ticket {
            ticket.await?;
        }
        while !self.serializer.has_page(page) {
            self.serializer.ensure_loaded().await?;
        }

        if self.render_seq.load(Ordering::SeqCst) != seq {
            debug!("Render of page {} superseded by a newer request", page);
            return Ok(());
        }

        let content = self
            .serializer
            .page(page)
            .ok_or_else(|| Error::store(format!("page {page} vanished from the cache")))?;
        self.view.show_page(page, &content);
        self.view.hide_loading();
        Ok(())
    }

    fn start_preload(&self) {
        let serializer = self.serializer.clone();
        let handle = tokio::spawn(preload(serializer));
        *self.preload.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }
}

impl std::fmt::Debug for PaginationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationController")
            .field("config", &self.config)
            .field("serializer", &self.serializer)
            .field("active_page", &self.active_page())
            .finish_non_exhaustive()
    }
}

/// Keep loading until every page is cached
async fn preload(serializer: FetchSerializer) -> Result<usize> {
    while !serializer.is_complete() {
        serializer.ensure_loaded().await?;
    }

    let loaded = serializer.loaded_pages();
    info!("Preloaded all {} pages of {}", loaded, serializer.base_uri());
    Ok(loaded)
}

fn check_range(page: usize, total_pages: usize) -> Result<()> {
    if page == 0 || page > total_pages {
        return Err(Error::OutOfRangeSelection { page, total_pages });
    }
    Ok(())
}
