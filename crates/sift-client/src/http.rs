//! HTTP implementation of the backend contract.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use sift_core::{
    defaults, Error, FileRecord, IndexStatus, Keyword, RequestParams, Result, RiskLevel, ScanMode,
    SearchMode, SearchResult,
};

use crate::backend::ApiBackend;
use crate::wire::{WireAck, WireFileList, WireLogin, WireSearchResult, WireStatus};

/// Default backend endpoint.
pub const DEFAULT_API_BASE: &str = defaults::API_BASE;

/// reqwest-backed [`ApiBackend`] implementation.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend client against the default endpoint.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE.to_string())
    }

    /// Create a backend client against a custom endpoint.
    pub fn with_base_url(base_url: String) -> Result<Self> {
        let timeout = std::env::var("SIFT_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::REQUEST_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        info!("Initializing backend client: url={}", base_url);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("SIFT_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::with_base_url(base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reject non-2xx responses, surfacing the backend's body verbatim so
    /// backend-reported errors (invalid regex, auth failures) reach the user
    /// unchanged.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized(body));
        }
        Err(Error::Backend(format!("{}: {}", status, body)))
    }
}

#[async_trait]
impl ApiBackend for HttpBackend {
    #[instrument(skip(self), fields(subsystem = "client", component = "http_backend", op = "status"))]
    async fn status(&self) -> Result<IndexStatus> {
        let response = self
            .client
            .get(self.url("/status"))
            .send()
            .await
            .map_err(|e| Error::Request(format!("Status fetch failed: {}", e)))?;
        let wire: WireStatus = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse status: {}", e)))?;
        Ok(wire.into())
    }

    #[instrument(skip(self), fields(subsystem = "client", component = "http_backend", op = "start_indexing", mode = mode.as_param()))]
    async fn start_indexing(&self, mode: ScanMode) -> Result<String> {
        let response = self
            .client
            .post(self.url("/load"))
            .query(&[("mode", mode.as_param())])
            .send()
            .await
            .map_err(|e| Error::Request(format!("Load request failed: {}", e)))?;
        let ack: WireAck = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse load response: {}", e)))?;
        Ok(ack.into_message())
    }

    #[instrument(skip(self), fields(subsystem = "client", component = "http_backend", op = "files", request_id = %Uuid::new_v4()))]
    async fn files(
        &self,
        risk_level: Option<RiskLevel>,
        q: Option<&str>,
    ) -> Result<Vec<FileRecord>> {
        let start = Instant::now();

        let mut request = self.client.get(self.url("/files"));
        if let Some(level) = risk_level {
            request = request.query(&[("risk_level", level.as_param())]);
        }
        if let Some(q) = q {
            request = request.query(&[("q", q)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Request(format!("File listing failed: {}", e)))?;
        let wire: WireFileList = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse file list: {}", e)))?;

        let records: Vec<FileRecord> = wire.files.into_iter().map(Into::into).collect();
        debug!(
            result_count = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "File listing complete"
        );
        Ok(records)
    }

    #[instrument(skip(self, params), fields(subsystem = "client", component = "http_backend", op = "search", mode = params.mode, request_id = %Uuid::new_v4()))]
    async fn search(&self, params: &RequestParams) -> Result<Vec<SearchResult>> {
        let start = Instant::now();

        let response = self
            .client
            .get(self.url("/search"))
            .query(&[("q", params.q.as_str()), ("mode", params.mode)])
            .send()
            .await
            .map_err(|e| Error::Request(format!("Search request failed: {}", e)))?;
        let wire: Vec<WireSearchResult> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse search results: {}", e)))?;

        let results: Vec<SearchResult> = wire.into_iter().map(Into::into).collect();
        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            result_count = results.len(),
            duration_ms = elapsed,
            "Search complete"
        );
        if elapsed > 10_000 {
            warn!(
                duration_ms = elapsed,
                mode = params.mode,
                slow = true,
                "Slow search operation"
            );
        }
        Ok(results)
    }

    #[instrument(skip(self), fields(subsystem = "client", component = "http_backend", op = "recent"))]
    async fn recent(&self, mode: SearchMode) -> Result<Vec<SearchResult>> {
        let response = self
            .client
            .get(self.url("/recent"))
            .query(&[("mode", mode.tag())])
            .send()
            .await
            .map_err(|e| Error::Request(format!("Recent fetch failed: {}", e)))?;
        let wire: Vec<WireSearchResult> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse recent results: {}", e)))?;
        Ok(wire.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self), fields(subsystem = "client", component = "http_backend", op = "keywords"))]
    async fn keywords(&self) -> Result<Vec<Keyword>> {
        let response = self
            .client
            .get(self.url("/keywords"))
            .send()
            .await
            .map_err(|e| Error::Request(format!("Keyword fetch failed: {}", e)))?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse keywords: {}", e)))
    }

    #[instrument(skip(self), fields(subsystem = "client", component = "http_backend", op = "add_keyword"))]
    async fn add_keyword(&self, keyword: &str) -> Result<Keyword> {
        if keyword.trim().is_empty() {
            return Err(Error::InvalidInput("empty keyword".to_string()));
        }
        let response = self
            .client
            .post(self.url("/keywords"))
            .json(&serde_json::json!({ "keyword": keyword }))
            .send()
            .await
            .map_err(|e| Error::Request(format!("Keyword create failed: {}", e)))?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse keyword: {}", e)))
    }

    #[instrument(skip(self), fields(subsystem = "client", component = "http_backend", op = "delete_keyword", keyword_id = id))]
    async fn delete_keyword(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/keywords/{}", id)))
            .send()
            .await
            .map_err(|e| Error::Request(format!("Keyword delete failed: {}", e)))?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self, password), fields(subsystem = "client", component = "http_backend", op = "login"))]
    async fn login(&self, username: &str, password: &str) -> Result<bool> {
        let response = self
            .client
            .post(self.url("/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|e| Error::Request(format!("Login request failed: {}", e)))?;
        let wire: WireLogin = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse login response: {}", e)))?;
        Ok(wire.success)
    }

    #[instrument(skip(self, bytes), fields(subsystem = "client", component = "http_backend", op = "upload", size = bytes.len()))]
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<String> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Request(format!("Upload failed: {}", e)))?;
        let ack: WireAck = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse upload response: {}", e)))?;
        Ok(ack.into_message())
    }

    #[instrument(skip(self), fields(subsystem = "client", component = "http_backend", op = "export_db"))]
    async fn export_db(&self) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.url("/export-db"))
            .send()
            .await
            .map_err(|e| Error::Request(format!("Export failed: {}", e)))?;
        let bytes = Self::check(response)
            .await?
            .bytes()
            .await
            .map_err(|e| Error::Request(format!("Export body read failed: {}", e)))?;
        Ok(bytes.to_vec())
    }

    #[instrument(skip(self, bytes), fields(subsystem = "client", component = "http_backend", op = "import_db", size = bytes.len()))]
    async fn import_db(&self, bytes: Vec<u8>) -> Result<String> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name("import.db".to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.url("/import-db"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Request(format!("Import failed: {}", e)))?;
        let ack: WireAck = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse import response: {}", e)))?;
        Ok(ack.into_message())
    }
}
