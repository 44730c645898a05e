//! Search session: query/result/listing state and its arbitration.
//!
//! One writer discipline: session methods and the poller event handler
//! mutate the shared state; everything else reads snapshots. Responses are
//! applied only if their sequence number is still the newest for that state
//! slot, so a slow superseded response can never overwrite fresher data,
//! and a closed session ignores everything still in flight.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use sift_client::ApiBackend;
use sift_core::{
    translate, FileRecord, IndexStatus, Keyword, QuickFilter, Result, RiskLevel, ScanMode,
    SearchMode, SearchQuery, SearchResult,
};

use crate::poller::PollerEvent;

/// Displayed state of one dashboard session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Query text as displayed; always consistent with `mode`.
    pub query: String,
    pub mode: SearchMode,
    /// Current result set. Stale results stay visible while a new search is
    /// loading; abrupt blanking is avoided on purpose.
    pub results: Vec<SearchResult>,
    /// Current file listing (separate data flow from search).
    pub files: Vec<FileRecord>,
    /// Server-side risk-level narrowing for the file listing.
    pub risk_filter: Option<RiskLevel>,
    /// Server-side filename-substring narrowing for the file listing.
    pub file_query: Option<String>,
    pub keywords: Vec<Keyword>,
    pub is_loading: bool,
    /// Last backend or transport error, shown until the next success.
    pub last_error: Option<String>,
    /// Mirrored indexing job state (written by the poller event handler).
    pub job: IndexStatus,
}

/// Orchestrator owning one dashboard session's state.
///
/// Clone-cheap; clones share the same state and arbitration counters.
pub struct SearchSession<B: ApiBackend> {
    backend: Arc<B>,
    state: Arc<RwLock<SessionState>>,
    search_seq: Arc<AtomicU64>,
    files_seq: Arc<AtomicU64>,
    closed: Arc<AtomicBool>,
}

impl<B: ApiBackend> Clone for SearchSession<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            state: self.state.clone(),
            search_seq: self.search_seq.clone(),
            files_seq: self.files_seq.clone(),
            closed: self.closed.clone(),
        }
    }
}

impl<B: ApiBackend> SearchSession<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(SessionState::default())),
            search_seq: Arc::new(AtomicU64::new(0)),
            files_seq: Arc::new(AtomicU64::new(0)),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Tear down the session: any in-flight response becomes a no-op. The
    /// caller owns the poller handle and shuts it down separately.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        info!("Session closed");
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Submit a search. Empty text is a no-op, not an error.
    ///
    /// On success the whole result set is replaced; on failure the previous
    /// results stay and the error is surfaced.
    pub async fn submit(&self, text: impl Into<String>, mode: SearchMode) -> Result<()> {
        let text = text.into();
        if text.trim().is_empty() {
            debug!("Empty query ignored");
            return Ok(());
        }
        if self.is_closed() {
            return Ok(());
        }

        let seq = self.search_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            // Guarded like the response below: two racing submits can take
            // this lock out of issue order, and the older one must not
            // leave its text displayed after the newer one installed.
            let mut state = self.state.write().await;
            if seq == self.search_seq.load(Ordering::SeqCst) {
                state.query = text.clone();
                state.mode = mode;
                state.is_loading = true;
            }
        }

        let query = SearchQuery::new(text, mode);
        let outcome = self.backend.search(&translate(&query)).await;

        let mut state = self.state.write().await;
        if self.is_closed() {
            return Ok(());
        }
        if seq != self.search_seq.load(Ordering::SeqCst) {
            // A newer submit was issued while this one was in flight.
            debug!(seq, "Discarding superseded search response");
            return Ok(());
        }

        match outcome {
            Ok(results) => {
                debug!(seq, result_count = results.len(), "Search applied");
                state.results = results;
                state.is_loading = false;
                state.last_error = None;
            }
            Err(e) => {
                warn!(seq, error = %e, "Search failed; prior results kept");
                state.is_loading = false;
                state.last_error = Some(e.to_string());
            }
        }
        Ok(())
    }

    /// Run a quick filter: installs the canonical pattern *and* its required
    /// mode into displayed state, then searches. The mode override prevents
    /// an inconsistent text/mode pairing.
    pub async fn quick_search(&self, filter: QuickFilter) -> Result<()> {
        let query = filter.query();
        self.submit(query.text, query.mode).await
    }

    /// Fetch the most recently indexed matches in the current mode.
    pub async fn load_recent(&self) -> Result<()> {
        if self.is_closed() {
            return Ok(());
        }
        let seq = self.search_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let mode = self.state.read().await.mode;

        let outcome = self.backend.recent(mode).await;

        let mut state = self.state.write().await;
        if self.is_closed() || seq != self.search_seq.load(Ordering::SeqCst) {
            return Ok(());
        }
        match outcome {
            Ok(results) => {
                state.results = results;
                state.last_error = None;
            }
            Err(e) => {
                state.last_error = Some(e.to_string());
            }
        }
        Ok(())
    }

    /// Refetch the file listing with the session's server-side criteria.
    ///
    /// Full replace is the only update mechanism; there is no partial
    /// patching of records.
    pub async fn refresh_files(&self) -> Result<()> {
        if self.is_closed() {
            return Ok(());
        }
        let seq = self.files_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let (risk, q) = {
            let state = self.state.read().await;
            (state.risk_filter, state.file_query.clone())
        };

        let outcome = self.backend.files(risk, q.as_deref()).await;

        let mut state = self.state.write().await;
        if self.is_closed() || seq != self.files_seq.load(Ordering::SeqCst) {
            debug!(seq, "Discarding superseded file listing");
            return Ok(());
        }
        match outcome {
            Ok(files) => {
                debug!(seq, result_count = files.len(), "File listing applied");
                state.files = files;
                state.last_error = None;
            }
            Err(e) => {
                warn!(seq, error = %e, "File listing failed; prior listing kept");
                state.last_error = Some(e.to_string());
            }
        }
        Ok(())
    }

    /// Set the server-side file-listing criteria and refetch.
    pub async fn set_file_criteria(
        &self,
        risk: Option<RiskLevel>,
        q: Option<String>,
    ) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.risk_filter = risk;
            state.file_query = q;
        }
        self.refresh_files().await
    }

    /// Consume a poller event. The finished edge triggers a file-listing
    /// refetch; it never resubmits the active search, because an unsolicited
    /// regex or substring re-scan must not be imposed silently.
    pub async fn handle_poller_event(&self, event: PollerEvent) -> Result<()> {
        match event {
            PollerEvent::Status(status) => {
                let mut state = self.state.write().await;
                if !self.is_closed() {
                    state.job = status;
                }
                Ok(())
            }
            PollerEvent::IndexingFinished(status) => {
                info!("Indexing finished; refreshing file listing");
                {
                    let mut state = self.state.write().await;
                    if self.is_closed() {
                        return Ok(());
                    }
                    state.job = status;
                }
                self.refresh_files().await
            }
            PollerEvent::PollerStarted | PollerEvent::PollerStopped => Ok(()),
        }
    }

    /// Start an indexing job. Progress arrives via the poller.
    pub async fn start_indexing(&self, mode: ScanMode) -> Result<String> {
        self.backend.start_indexing(mode).await
    }

    /// Refetch the keyword list from the backend.
    pub async fn refresh_keywords(&self) -> Result<()> {
        let keywords = self.backend.keywords().await?;
        let mut state = self.state.write().await;
        if !self.is_closed() {
            state.keywords = keywords;
        }
        Ok(())
    }

    /// Create an alert term, then refetch the authoritative list. No
    /// optimistic local append.
    pub async fn add_keyword(&self, keyword: &str) -> Result<()> {
        self.backend.add_keyword(keyword).await?;
        self.refresh_keywords().await
    }

    /// Delete an alert term, then refetch the authoritative list.
    pub async fn remove_keyword(&self, id: i64) -> Result<()> {
        self.backend.delete_keyword(id).await?;
        self.refresh_keywords().await
    }

    /// Boolean login gate. No authorization logic beyond this.
    pub async fn login(&self, username: &str, password: &str) -> Result<bool> {
        self.backend.login(username, password).await
    }
}
