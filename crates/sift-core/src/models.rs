//! Core data models for the sift client.
//!
//! Canonical internal shapes mirrored from the backend. Wire-format
//! tolerance (dual field names, flexible timestamps) is handled once at the
//! ingestion boundary in `sift-client`; everything past that boundary sees
//! only these types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// =============================================================================
// INDEXING JOB STATE
// =============================================================================

/// Phase of the backend indexing job. Exactly one holds at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexPhase {
    Idle,
    Scanning,
    Finished,
    /// Also the catch-all for status strings this client does not know,
    /// so protocol drift shows up instead of reading as "idle".
    Error,
}

impl<'de> Deserialize<'de> for IndexPhase {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // The original backend reports lowercase phases; tolerate any casing
        // and a couple of historical spellings.
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.to_ascii_lowercase().as_str() {
            "idle" => IndexPhase::Idle,
            "scanning" => IndexPhase::Scanning,
            "finished" | "loaded" | "done" => IndexPhase::Finished,
            _ => IndexPhase::Error,
        })
    }
}

impl Default for IndexPhase {
    fn default() -> Self {
        IndexPhase::Idle
    }
}

impl std::fmt::Display for IndexPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Scanning => write!(f, "scanning"),
            Self::Finished => write!(f, "finished"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Scan depth requested when starting an indexing job.
///
/// `Fast` skips OCR and exhaustive extraction server-side; `Deep` allows
/// everything. The distinction is the backend's, mirrored here for the
/// `/load` call and the status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScanMode {
    Fast,
    Deep,
}

impl ScanMode {
    /// Wire value for the `/load?mode=` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Fast => "FAST",
            Self::Deep => "DEEP",
        }
    }
}

/// Locally mirrored state of the backend indexing job.
///
/// Eventually consistent: updated at poll granularity, never mutated by
/// anything but a fresh `/status` sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStatus {
    pub phase: IndexPhase,
    /// Files processed so far.
    pub current: u64,
    /// Total files to process; 0 means the total is not (yet) known.
    pub total: u64,
    /// Free-text status string, display only.
    pub message: String,
    /// File currently being processed, when the backend reports one.
    pub current_file: Option<String>,
    /// Scan depth of the running job, when the backend reports one.
    pub mode: Option<ScanMode>,
}

impl IndexStatus {
    /// True when progress should be displayed as indeterminate.
    pub fn is_indeterminate(&self) -> bool {
        self.total == 0
    }

    /// Progress ratio in `[0.0, 1.0]`, or None when indeterminate.
    pub fn progress(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some((self.current as f64 / self.total as f64).min(1.0))
        }
    }
}

// =============================================================================
// RISK
// =============================================================================

/// Backend-assigned severity label for a file's detected content.
///
/// Total order `Critical > High > Medium > Low > Unknown`, used for display
/// emphasis only; filtering by level happens server-side via a request
/// parameter, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Not yet analyzed or not reported. The backend's transient `PENDING`
    /// value maps here too.
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.to_ascii_uppercase().as_str() {
            "CRITICAL" => RiskLevel::Critical,
            "HIGH" => RiskLevel::High,
            "MEDIUM" => RiskLevel::Medium,
            "LOW" => RiskLevel::Low,
            // PENDING (pre-analysis) and anything unrecognized
            _ => RiskLevel::Unknown,
        })
    }
}

impl Default for RiskLevel {
    fn default() -> Self {
        RiskLevel::Unknown
    }
}

impl RiskLevel {
    /// Wire value for the `/files?risk_level=` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Unknown => "UNKNOWN",
        }
    }
}

// =============================================================================
// SEARCH RESULTS
// =============================================================================

/// One backend match. Immutable; each search replaces the whole set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub filename: String,
    pub path: String,
    /// Line number of the match, when the backend indexed line-oriented
    /// content.
    pub lineno: Option<u64>,
    /// Backend-pre-rendered highlight fragment. May contain markup produced
    /// by the backend's highlighter; it is passed through untouched, and
    /// sanitizing it is the backend's responsibility (documented trust
    /// boundary).
    pub snippet: String,
    pub risk_level: RiskLevel,
    /// Numeric risk score; absent on the wire means 0.0. Display-rounded to
    /// one decimal via [`SearchResult::display_score`].
    pub risk_score: f64,
    /// Open-ended, backend-defined nested value. No shape assumptions beyond
    /// "JSON-like tree"; rendering is bounded by `sift_core::render`.
    pub metadata: JsonValue,
    pub match_count: Option<u64>,
}

impl SearchResult {
    /// Risk score rounded to one decimal for display.
    pub fn display_score(&self) -> String {
        format!("{:.1}", self.risk_score)
    }
}

// =============================================================================
// FILE RECORDS
// =============================================================================

/// One indexed file, as listed by `/files`.
///
/// Created by the backend indexing job; the client never mutates records, a
/// full replace-by-refetch is the only update mechanism.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Option<i64>,
    pub filename: String,
    pub path: String,
    /// Canonical type label: the backend's detected `true_type` when
    /// present, otherwise its extension-derived `type`.
    pub file_type: String,
    /// Size in bytes.
    pub size: u64,
    /// Whether any text content was extracted from the file.
    pub has_text: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    /// Detection/metadata tree for this file, same open-ended shape as
    /// [`SearchResult::metadata`]. `JsonValue::Null` when the backend sent
    /// nothing usable.
    pub details: JsonValue,
}

// =============================================================================
// KEYWORDS
// =============================================================================

/// User-managed custom alert term.
///
/// The list is refetched after every mutation; there is no optimistic local
/// edit, the backend's copy stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub id: i64,
    pub keyword: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_phase_accepts_lowercase_and_capitalized() {
        let p: IndexPhase = serde_json::from_str("\"scanning\"").unwrap();
        assert_eq!(p, IndexPhase::Scanning);
        let p: IndexPhase = serde_json::from_str("\"Scanning\"").unwrap();
        assert_eq!(p, IndexPhase::Scanning);
    }

    #[test]
    fn test_index_phase_unknown_string_is_error() {
        let p: IndexPhase = serde_json::from_str("\"exploded\"").unwrap();
        assert_eq!(p, IndexPhase::Error);
    }

    #[test]
    fn test_index_status_indeterminate_when_total_zero() {
        let status = IndexStatus {
            phase: IndexPhase::Scanning,
            current: 10,
            total: 0,
            ..Default::default()
        };
        assert!(status.is_indeterminate());
        assert_eq!(status.progress(), None);
    }

    #[test]
    fn test_index_status_progress_clamped() {
        let status = IndexStatus {
            current: 150,
            total: 100,
            ..Default::default()
        };
        assert_eq!(status.progress(), Some(1.0));
    }

    #[test]
    fn test_risk_level_total_order() {
        assert!(RiskLevel::Critical > RiskLevel::High);
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Medium > RiskLevel::Low);
        assert!(RiskLevel::Low > RiskLevel::Unknown);
    }

    #[test]
    fn test_risk_level_pending_maps_to_unknown() {
        let level: RiskLevel = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(level, RiskLevel::Unknown);
    }

    #[test]
    fn test_risk_level_unknown_string_maps_to_unknown() {
        let level: RiskLevel = serde_json::from_str("\"WEIRD\"").unwrap();
        assert_eq!(level, RiskLevel::Unknown);
    }

    #[test]
    fn test_risk_level_uppercase_wire_form() {
        let level: RiskLevel = serde_json::from_str("\"CRITICAL\"").unwrap();
        assert_eq!(level, RiskLevel::Critical);
        assert_eq!(level.as_param(), "CRITICAL");
    }

    #[test]
    fn test_scan_mode_params() {
        assert_eq!(ScanMode::Fast.as_param(), "FAST");
        assert_eq!(ScanMode::Deep.as_param(), "DEEP");
    }

    #[test]
    fn test_display_score_rounds_to_one_decimal() {
        let result = SearchResult {
            risk_score: 72.34999,
            ..Default::default()
        };
        assert_eq!(result.display_score(), "72.3");
    }

    #[test]
    fn test_display_score_defaulted() {
        let result = SearchResult::default();
        assert_eq!(result.display_score(), "0.0");
    }
}
