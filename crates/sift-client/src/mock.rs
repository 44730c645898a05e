//! Mock backend for deterministic testing.
//!
//! Scripted responses, no network. Status samples play back in order (the
//! last one repeats), searches and listings return canned data or injected
//! failures, and every call is logged so tests can assert on traffic.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use sift_core::{
    Error, FileRecord, IndexStatus, Keyword, RequestParams, Result, RiskLevel, ScanMode,
    SearchMode, SearchResult,
};

use crate::backend::ApiBackend;

/// One logged backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
}

#[derive(Default)]
struct MockState {
    status_script: Vec<IndexStatus>,
    status_cursor: usize,
    search_results: Vec<SearchResult>,
    search_by_query: HashMap<String, Vec<SearchResult>>,
    search_delays: Vec<u64>,
    files: Vec<FileRecord>,
    keywords: Vec<Keyword>,
    next_keyword_id: i64,
    fail_search: Option<String>,
    fail_status: Option<String>,
    fail_files: Option<String>,
    calls: Vec<MockCall>,
}

/// Scriptable in-memory [`ApiBackend`].
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the sequence of `/status` samples. Each call to `status()`
    /// advances the cursor; the final sample repeats forever.
    pub fn with_status_script(self, script: Vec<IndexStatus>) -> Self {
        self.state.lock().unwrap().status_script = script;
        self
    }

    /// Canned results for any search.
    pub fn with_search_results(self, results: Vec<SearchResult>) -> Self {
        self.state.lock().unwrap().search_results = results;
        self
    }

    /// Script per-call search latency in milliseconds, consumed in call
    /// order; calls past the end of the script respond immediately. Lets
    /// tests land an older response after a newer one.
    pub fn with_search_delays(self, delays_ms: Vec<u64>) -> Self {
        self.state.lock().unwrap().search_delays = delays_ms;
        self
    }

    /// Canned results for a specific query text (overrides the default set).
    pub fn with_results_for(self, query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        self.state
            .lock()
            .unwrap()
            .search_by_query
            .insert(query.into(), results);
        self
    }

    /// Canned file listing.
    pub fn with_files(self, files: Vec<FileRecord>) -> Self {
        self.state.lock().unwrap().files = files;
        self
    }

    /// Seed the keyword list.
    pub fn with_keywords(self, keywords: Vec<Keyword>) -> Self {
        let mut state = self.state.lock().unwrap();
        state.next_keyword_id = keywords.iter().map(|k| k.id).max().unwrap_or(0) + 1;
        state.keywords = keywords;
        drop(state);
        self
    }

    /// Make every search fail with the given backend message.
    pub fn with_search_failure(self, message: impl Into<String>) -> Self {
        self.state.lock().unwrap().fail_search = Some(message.into());
        self
    }

    /// Make every status fetch fail with the given message.
    pub fn with_status_failure(self, message: impl Into<String>) -> Self {
        self.state.lock().unwrap().fail_status = Some(message.into());
        self
    }

    /// Make every file listing fail with the given message.
    pub fn with_files_failure(self, message: impl Into<String>) -> Self {
        self.state.lock().unwrap().fail_files = Some(message.into());
        self
    }

    /// Replace the canned search results after construction (e.g. between
    /// two submits in a test).
    pub fn set_search_results(&self, results: Vec<SearchResult>) {
        self.state.lock().unwrap().search_results = results;
    }

    /// Start (or stop, with `None`) failing searches after construction.
    pub fn set_search_failure(&self, message: Option<String>) {
        self.state.lock().unwrap().fail_search = message;
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of calls to a given operation.
    pub fn call_count(&self, operation: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn log(&self, operation: &str, input: impl Into<String>) {
        self.state.lock().unwrap().calls.push(MockCall {
            operation: operation.to_string(),
            input: input.into(),
        });
    }
}

#[async_trait]
impl ApiBackend for MockBackend {
    async fn status(&self) -> Result<IndexStatus> {
        self.log("status", "");
        let mut state = self.state.lock().unwrap();
        if let Some(msg) = &state.fail_status {
            return Err(Error::Request(msg.clone()));
        }
        if state.status_script.is_empty() {
            return Ok(IndexStatus::default());
        }
        let idx = state.status_cursor.min(state.status_script.len() - 1);
        state.status_cursor += 1;
        Ok(state.status_script[idx].clone())
    }

    async fn start_indexing(&self, mode: ScanMode) -> Result<String> {
        self.log("start_indexing", mode.as_param());
        Ok("Indexing started".to_string())
    }

    async fn files(
        &self,
        risk_level: Option<RiskLevel>,
        q: Option<&str>,
    ) -> Result<Vec<FileRecord>> {
        self.log(
            "files",
            format!(
                "risk={:?} q={}",
                risk_level.map(|l| l.as_param()),
                q.unwrap_or_default()
            ),
        );
        let state = self.state.lock().unwrap();
        if let Some(msg) = &state.fail_files {
            return Err(Error::Request(msg.clone()));
        }
        // Server-side narrowing, mirrored for realism.
        Ok(state
            .files
            .iter()
            .filter(|f| risk_level.map_or(true, |l| f.risk_level == l))
            .filter(|f| q.map_or(true, |q| f.filename.contains(q)))
            .cloned()
            .collect())
    }

    async fn search(&self, params: &RequestParams) -> Result<Vec<SearchResult>> {
        self.log("search", format!("{} [{}]", params.q, params.mode));
        let delay_ms = {
            let mut state = self.state.lock().unwrap();
            if state.search_delays.is_empty() {
                None
            } else {
                Some(state.search_delays.remove(0))
            }
        };
        if let Some(ms) = delay_ms {
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        }
        let state = self.state.lock().unwrap();
        if let Some(msg) = &state.fail_search {
            return Err(Error::Backend(msg.clone()));
        }
        if let Some(results) = state.search_by_query.get(&params.q) {
            return Ok(results.clone());
        }
        Ok(state.search_results.clone())
    }

    async fn recent(&self, mode: SearchMode) -> Result<Vec<SearchResult>> {
        self.log("recent", mode.tag());
        Ok(self.state.lock().unwrap().search_results.clone())
    }

    async fn keywords(&self) -> Result<Vec<Keyword>> {
        self.log("keywords", "");
        Ok(self.state.lock().unwrap().keywords.clone())
    }

    async fn add_keyword(&self, keyword: &str) -> Result<Keyword> {
        self.log("add_keyword", keyword);
        let mut state = self.state.lock().unwrap();
        state.next_keyword_id += 1;
        let created = Keyword {
            id: state.next_keyword_id,
            keyword: keyword.to_string(),
        };
        state.keywords.push(created.clone());
        Ok(created)
    }

    async fn delete_keyword(&self, id: i64) -> Result<()> {
        self.log("delete_keyword", id.to_string());
        self.state.lock().unwrap().keywords.retain(|k| k.id != id);
        Ok(())
    }

    async fn login(&self, username: &str, _password: &str) -> Result<bool> {
        self.log("login", username);
        Ok(username == "admin")
    }

    async fn upload(&self, filename: &str, _bytes: Vec<u8>) -> Result<String> {
        self.log("upload", filename);
        Ok(format!("Uploaded {}", filename))
    }

    async fn export_db(&self) -> Result<Vec<u8>> {
        self.log("export_db", "");
        Ok(Vec::new())
    }

    async fn import_db(&self, _bytes: Vec<u8>) -> Result<String> {
        self.log("import_db", "");
        Ok("Imported".to_string())
    }
}
