//! Fetch serializer implementation

use crate::error::{Error, Result};
use crate::store::PageStore;
use crate::transport::PageTransport;
use crate::types::Cursor;
use futures::FutureExt;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tracing::{debug, error};

/// State of the serializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPhase {
    /// No fetch in flight
    Idle,
    /// Exactly one fetch in flight
    Loading,
    /// A fetch failed; no further fetches will be issued
    Stalled {
        /// Description of the failure
        reason: String,
    },
}

/// What a completed load request achieved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and cached under this ordinal
    Fetched {
        /// 1-based ordinal of the new page
        ordinal: usize,
    },
    /// Every page was already cached; nothing was fetched
    Complete,
}

type Waiter = oneshot::Sender<Result<LoadOutcome>>;

/// Pending result of `FetchSerializer::ensure_loaded`
#[derive(Debug)]
#[must_use = "a load ticket does nothing unless awaited"]
pub struct LoadTicket {
    rx: oneshot::Receiver<Result<LoadOutcome>>,
}

impl Future for LoadTicket {
    type Output = Result<LoadOutcome>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.rx.poll_unpin(cx).map(|received| {
            received.unwrap_or_else(|_| Err(Error::stalled("fetch driver ended without a result")))
        })
    }
}

struct Shared {
    store: PageStore,
    phase: FetchPhase,
    /// Requests that arrived while a fetch was in flight, oldest first
    deferred: VecDeque<Waiter>,
    fetches_issued: usize,
}

struct Inner {
    base_uri: String,
    transport: Arc<dyn PageTransport>,
    shared: Mutex<Shared>,
}

/// Serializes cursor-dependent page fetches into a shared page store
#[derive(Clone)]
pub struct FetchSerializer {
    inner: Arc<Inner>,
}

impl FetchSerializer {
    /// Create a serializer with an empty store
    pub fn new(base_uri: impl Into<String>, transport: Arc<dyn PageTransport>) -> Self {
        Self {
            inner: Arc::new(Inner {
                base_uri: base_uri.into(),
                transport,
                shared: Mutex::new(Shared {
                    store: PageStore::new(),
                    phase: FetchPhase::Idle,
                    deferred: VecDeque::new(),
                    fetches_issued: 0,
                }),
            }),
        }
    }

    /// Request that one more page be loaded.
    ///
    /// The request is registered immediately, so tickets resolve in the order
    /// `ensure_loaded` was called. When idle, a driver task is spawned on the
    /// current Tokio runtime; otherwise the request waits in the queue.
    pub fn ensure_loaded(&self) -> LoadTicket {
        let (tx, rx) = oneshot::channel();
        let mut shared = self.inner.lock();

        let stalled = match &shared.phase {
            FetchPhase::Stalled { reason } => Some(reason.clone()),
            _ => None,
        };
        if let Some(reason) = stalled {
            drop(shared);
            let _ = tx.send(Err(Error::stalled(reason)));
            return LoadTicket { rx };
        }

        if shared.phase == FetchPhase::Loading {
            shared.deferred.push_back(tx);
            debug!(
                "Fetch in flight, deferring load request ({} queued)",
                shared.deferred.len()
            );
            return LoadTicket { rx };
        }

        shared.phase = FetchPhase::Loading;
        drop(shared);
        tokio::spawn(drive(Arc::clone(&self.inner), tx));
        LoadTicket { rx }
    }

    /// Record the total page count (once)
    pub fn set_total_pages(&self, total: usize) -> Result<()> {
        self.inner.lock().store.set_total_pages(total)
    }

    /// Total page count, if known
    pub fn total_pages(&self) -> Option<usize> {
        self.inner.lock().store.total_pages()
    }

    /// Check if page `page` is cached
    pub fn has_page(&self, page: usize) -> bool {
        self.inner.lock().store.has_page(page)
    }

    /// Copy of a cached page payload
    pub fn page(&self, page: usize) -> Option<String> {
        self.inner.lock().store.page(page).map(str::to_string)
    }

    /// Number of cached pages
    pub fn loaded_pages(&self) -> usize {
        self.inner.lock().store.len()
    }

    /// Check if every page is cached
    pub fn is_complete(&self) -> bool {
        self.inner.lock().store.is_complete()
    }

    /// Cursor the next fetch will use
    pub fn cursor(&self) -> Cursor {
        self.inner.lock().store.cursor().clone()
    }

    /// Current phase
    pub fn phase(&self) -> FetchPhase {
        self.inner.lock().phase.clone()
    }

    /// Number of requests waiting behind the in-flight fetch
    pub fn deferred_len(&self) -> usize {
        self.inner.lock().deferred.len()
    }

    /// Number of fetches handed to the transport so far
    pub fn fetches_issued(&self) -> usize {
        self.inner.lock().fetches_issued
    }

    /// Base URI pages are fetched from
    pub fn base_uri(&self) -> &str {
        &self.inner.base_uri
    }
}

impl std::fmt::Debug for FetchSerializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = self.inner.lock();
        f.debug_struct("FetchSerializer")
            .field("base_uri", &self.inner.base_uri)
            .field("phase", &shared.phase)
            .field("loaded_pages", &shared.store.len())
            .field("deferred", &shared.deferred.len())
            .finish_non_exhaustive()
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch the page after the current cursor and commit it.
    ///
    /// Nothing is written to the store unless the response is complete.
    async fn load_next(&self) -> Result<LoadOutcome> {
        let cursor = {
            let mut shared = self.lock();
            if shared.store.is_complete() {
                return Ok(LoadOutcome::Complete);
            }
            shared.fetches_issued += 1;
            shared.store.cursor().clone()
        };

        debug!("Issuing page fetch with cursor {}", cursor);
        let response = self.transport.fetch_page(&self.base_uri, &cursor).await?;
        let (content, next_cursor) = response.into_parts()?;

        let ordinal = self.lock().store.append_page(content, next_cursor);
        debug!("Cached page {}", ordinal);
        Ok(LoadOutcome::Fetched { ordinal })
    }
}

/// Serve the in-flight request, then drain the queue one fetch per request.
async fn drive(inner: Arc<Inner>, first: Waiter) {
    let mut waiter = first;

    loop {
        let result = inner.load_next().await;

        let (next, orphaned, stall_reason) = {
            let mut shared = inner.lock();
            match &result {
                Ok(_) => match shared.deferred.pop_front() {
                    Some(next) => (Some(next), Vec::new(), None),
                    None => {
                        shared.phase = FetchPhase::Idle;
                        (None, Vec::new(), None)
                    }
                },
                Err(e) => {
                    let reason = e.to_string();
                    error!(
                        "Page fetch failed after {} cached pages, stalling: {}",
                        shared.store.len(),
                        reason
                    );
                    shared.phase = FetchPhase::Stalled {
                        reason: reason.clone(),
                    };
                    let orphaned: Vec<Waiter> = shared.deferred.drain(..).collect();
                    (None, orphaned, Some(reason))
                }
            }
        };

        let _ = waiter.send(result);
        if let Some(reason) = stall_reason {
            for orphan in orphaned {
                let _ = orphan.send(Err(Error::stalled(reason.clone())));
            }
        }

        match next {
            Some(next) => waiter = next,
            None => break,
        }
    }
}
