//! Backend trait: the contract the orchestration layer programs against.

use async_trait::async_trait;

use sift_core::{
    FileRecord, IndexStatus, Keyword, RequestParams, Result, RiskLevel, ScanMode, SearchMode,
    SearchResult,
};

/// The forensic indexing backend, as seen by the client.
///
/// Everything here is an external collaborator contract (the backend may
/// stay in its current implementation language indefinitely). Implementors
/// must be cheap to share across tasks.
#[async_trait]
pub trait ApiBackend: Send + Sync {
    /// `GET /status` — current indexing job state.
    async fn status(&self) -> Result<IndexStatus>;

    /// `POST /load?mode=` — start an indexing job. Returns the backend's
    /// acknowledgement message; job content arrives via later polls.
    async fn start_indexing(&self, mode: ScanMode) -> Result<String>;

    /// `GET /files` — full file listing, optionally narrowed server-side by
    /// risk level and filename substring. Risk filtering happens only here,
    /// never client-side.
    async fn files(&self, risk_level: Option<RiskLevel>, q: Option<&str>)
        -> Result<Vec<FileRecord>>;

    /// `GET /search` — run a translated query.
    async fn search(&self, params: &RequestParams) -> Result<Vec<SearchResult>>;

    /// `GET /recent` — most recently indexed matches in the given mode.
    async fn recent(&self, mode: SearchMode) -> Result<Vec<SearchResult>>;

    /// `GET /keywords` — the user's alert terms.
    async fn keywords(&self) -> Result<Vec<Keyword>>;

    /// `POST /keywords` — create an alert term.
    async fn add_keyword(&self, keyword: &str) -> Result<Keyword>;

    /// `DELETE /keywords/{id}` — remove an alert term.
    async fn delete_keyword(&self, id: i64) -> Result<()>;

    /// `POST /login` — boolean gate only; no authorization logic lives in
    /// the client.
    async fn login(&self, username: &str, password: &str) -> Result<bool>;

    /// `POST /upload` — opaque passthrough of a file to the backend's
    /// incoming set.
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<String>;

    /// `GET /export-db` — opaque database snapshot.
    async fn export_db(&self) -> Result<Vec<u8>>;

    /// `POST /import-db` — opaque database restore.
    async fn import_db(&self, bytes: Vec<u8>) -> Result<String>;
}
