//! # sift-core
//!
//! Core types and pure logic for the sift forensic dashboard client.
//!
//! This crate holds everything that needs no I/O: the canonical data model
//! mirrored from the backend, query translation, client-side result
//! filtering, the bounded metadata renderer, and the export encoder.
//! Transport lives in `sift-client`, orchestration in `sift-session`.

pub mod defaults;
pub mod error;
pub mod export;
pub mod filter;
pub mod logging;
pub mod models;
pub mod query;
pub mod render;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use export::to_delimited_text;
pub use filter::{distinct_types, FilterCriteria, SizeFilter, SizeOp, TextFound};
pub use models::{
    FileRecord, IndexPhase, IndexStatus, Keyword, RiskLevel, ScanMode, SearchResult,
};
pub use query::{translate, QuickFilter, RequestParams, SearchMode, SearchQuery};
pub use render::{render, DisplayNode, NodeKind};
