//! Raw backend response shapes and their normalization.
//!
//! The backend's responses are tolerated loosely here — dual field names
//! (`type` vs `true_type`), timestamps as epoch seconds or date strings,
//! booleans as SQLite 0/1 integers, `details` as an embedded JSON string —
//! and converted into canonical `sift-core` models immediately after
//! receipt. Nothing past this module ever branches on source field naming,
//! and a malformed optional field defaults instead of failing the response.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

use sift_core::{FileRecord, IndexPhase, IndexStatus, RiskLevel, ScanMode, SearchResult};

// =============================================================================
// FLEXIBLE FIELD DESERIALIZERS
// =============================================================================

/// Accept a boolean or a 0/1 integer.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::Bool(b) => b,
        JsonValue::Number(n) => n.as_i64().unwrap_or(0) != 0,
        _ => false,
    })
}

/// Accept epoch seconds (integer or float) or a `%Y-%m-%d %H:%M:%S` /
/// RFC 3339 date string. Anything unparseable becomes None rather than an
/// error.
fn flexible_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(value.and_then(parse_timestamp))
}

fn parse_timestamp(value: JsonValue) -> Option<DateTime<Utc>> {
    match value {
        JsonValue::Number(n) => {
            let secs = n.as_f64()?;
            let nanos = ((secs - secs.trunc()) * 1e9) as u32;
            Utc.timestamp_opt(secs.trunc() as i64, nanos).single()
        }
        JsonValue::String(s) => {
            if let Ok(naive) = NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S") {
                return Some(naive.and_utc());
            }
            DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }
        _ => None,
    }
}

/// Accept the detection/metadata container either as a JSON string (the
/// backend stores it that way) or as an already-structured value.
/// Unparseable content degrades to Null.
fn embedded_json<'de, D>(deserializer: D) -> Result<JsonValue, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(match value {
        Some(JsonValue::String(s)) => serde_json::from_str(&s).unwrap_or(JsonValue::Null),
        Some(v) => v,
        None => JsonValue::Null,
    })
}

fn scan_mode_lenient<'de, D>(deserializer: D) -> Result<Option<ScanMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.to_ascii_uppercase().as_str() {
        "FAST" => Some(ScanMode::Fast),
        "DEEP" => Some(ScanMode::Deep),
        _ => None,
    }))
}

// =============================================================================
// STATUS
// =============================================================================

/// `GET /status` payload.
#[derive(Debug, Deserialize)]
pub struct WireStatus {
    #[serde(default = "default_phase", alias = "phase")]
    pub status: IndexPhase,
    #[serde(default)]
    pub current: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub current_file: Option<String>,
    #[serde(default, deserialize_with = "scan_mode_lenient")]
    pub mode: Option<ScanMode>,
}

fn default_phase() -> IndexPhase {
    IndexPhase::Idle
}

impl From<WireStatus> for IndexStatus {
    fn from(wire: WireStatus) -> Self {
        IndexStatus {
            phase: wire.status,
            current: wire.current,
            total: wire.total,
            message: wire.message,
            current_file: wire.current_file,
            mode: wire.mode,
        }
    }
}

// =============================================================================
// FILE RECORDS
// =============================================================================

/// `GET /files` envelope.
#[derive(Debug, Deserialize)]
pub struct WireFileList {
    #[serde(default)]
    pub files: Vec<WireFileRecord>,
}

/// One row of the backend's files table.
#[derive(Debug, Deserialize)]
pub struct WireFileRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub path: String,
    /// Extension-derived label, the backend's legacy naming.
    #[serde(default, rename = "type")]
    pub ext_type: Option<String>,
    /// Content-detected label; preferred when present.
    #[serde(default)]
    pub true_type: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default, deserialize_with = "flag")]
    pub has_text: bool,
    #[serde(default, deserialize_with = "flexible_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default, deserialize_with = "embedded_json")]
    pub details: JsonValue,
}

impl From<WireFileRecord> for FileRecord {
    fn from(wire: WireFileRecord) -> Self {
        let file_type = wire
            .true_type
            .or(wire.ext_type)
            .unwrap_or_default();
        FileRecord {
            id: wire.id,
            filename: wire.filename,
            path: wire.path,
            file_type,
            size: wire.size,
            has_text: wire.has_text,
            created_at: wire.created_at,
            risk_level: wire.risk_level,
            risk_score: wire.risk_score,
            details: wire.details,
        }
    }
}

// =============================================================================
// SEARCH RESULTS
// =============================================================================

/// One `GET /search` / `GET /recent` row.
#[derive(Debug, Deserialize)]
pub struct WireSearchResult {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub lineno: Option<u64>,
    /// Backend-pre-rendered fragment; passed through untouched.
    #[serde(default)]
    pub highlight: Option<String>,
    /// Raw matched line, the fallback when no highlight was rendered.
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default, deserialize_with = "embedded_json")]
    pub metadata: JsonValue,
    #[serde(default)]
    pub match_count: Option<u64>,
}

impl From<WireSearchResult> for SearchResult {
    fn from(wire: WireSearchResult) -> Self {
        let snippet = wire.highlight.or(wire.line).unwrap_or_default();
        let path = wire.path.unwrap_or_else(|| wire.filename.clone());
        SearchResult {
            filename: wire.filename,
            path,
            lineno: wire.lineno,
            snippet,
            risk_level: wire.risk_level,
            risk_score: wire.risk_score,
            metadata: wire.metadata,
            match_count: wire.match_count,
        }
    }
}

// =============================================================================
// SMALL ENVELOPES
// =============================================================================

/// Acknowledgement payload for `/load`, `/upload`, `/import-db`.
#[derive(Debug, Deserialize)]
pub struct WireAck {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl WireAck {
    /// The human-readable acknowledgement, whichever field carried it.
    pub fn into_message(self) -> String {
        self.message.or(self.status).unwrap_or_default()
    }
}

/// `POST /login` payload.
#[derive(Debug, Deserialize)]
pub struct WireLogin {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
