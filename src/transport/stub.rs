//! In-memory transport for unit tests
//!
//! Serves pages `page-1..=page-N` with cursors `c-1..=c-N`, records every
//! cursor it is called with and tracks how many fetches overlap.

use super::types::{PageResponse, PageTransport};
use crate::error::{Error, Result};
use crate::types::Cursor;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Injected failure for a given ordinal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StubFailure {
    /// Transport-level error (HTTP 500)
    Transport,
    /// Response without `html`
    MissingContent,
    /// Response without `nextPage`
    MissingCursor,
}

#[derive(Debug)]
pub(crate) struct StubTransport {
    total: usize,
    gate: Option<Arc<Semaphore>>,
    failures: Mutex<HashMap<usize, StubFailure>>,
    fail_next_total: AtomicBool,
    cursors: Mutex<Vec<Cursor>>,
    total_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubTransport {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            total,
            gate: None,
            failures: Mutex::new(HashMap::new()),
            fail_next_total: AtomicBool::new(false),
            cursors: Mutex::new(Vec::new()),
            total_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Every fetch waits for one permit on the returned semaphore
    pub(crate) fn gated(total: usize) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let mut stub = Self::new(total);
        stub.gate = Some(gate.clone());
        (stub, gate)
    }

    pub(crate) fn fail_at(self, ordinal: usize, failure: StubFailure) -> Self {
        self.failures.lock().unwrap().insert(ordinal, failure);
        self
    }

    /// The next `total_pages` call answers HTTP 503
    pub(crate) fn fail_next_total(self) -> Self {
        self.fail_next_total.store(true, Ordering::SeqCst);
        self
    }

    pub(crate) fn cursors(&self) -> Vec<Cursor> {
        self.cursors.lock().unwrap().clone()
    }

    pub(crate) fn fetches(&self) -> usize {
        self.cursors.lock().unwrap().len()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn ordinal_for(cursor: &Cursor) -> usize {
        match cursor {
            Cursor::Start => 1,
            Cursor::Token(token) => {
                token
                    .strip_prefix("c-")
                    .and_then(|n| n.parse::<usize>().ok())
                    .expect("stub only hands out c-N cursors")
                    + 1
            }
        }
    }
}

#[async_trait]
impl PageTransport for StubTransport {
    async fn total_pages(&self, _base_uri: &str) -> Result<usize> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.fail_next_total.swap(false, Ordering::SeqCst) {
            return Err(Error::http_status(503, "backend starting"));
        }
        Ok(self.total)
    }

    async fn fetch_page(&self, _base_uri: &str, cursor: &Cursor) -> Result<PageResponse> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.cursors.lock().unwrap().push(cursor.clone());

        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let ordinal = Self::ordinal_for(cursor);
        let failure = self.failures.lock().unwrap().get(&ordinal).copied();
        match failure {
            Some(StubFailure::Transport) => Err(Error::http_status(500, "backend down")),
            Some(StubFailure::MissingContent) => Ok(PageResponse {
                content: None,
                next_cursor: Some(format!("c-{ordinal}")),
            }),
            Some(StubFailure::MissingCursor) => Ok(PageResponse {
                content: Some(format!("page-{ordinal}")),
                next_cursor: None,
            }),
            None => Ok(PageResponse::new(
                format!("page-{ordinal}"),
                format!("c-{ordinal}"),
            )),
        }
    }
}
