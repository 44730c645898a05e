//! Centralized default constants for the sift client.
//!
//! **This module is the single source of truth** for shared default values.
//! All crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// BACKEND
// =============================================================================

/// Default backend base URL.
pub const API_BASE: &str = "http://127.0.0.1:8000";

/// Default per-request timeout in seconds (transport default only; callers
/// needing tighter latency impose their own at the call site).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// POLLING
// =============================================================================

/// Status poll interval in milliseconds. The backend updates its indexing
/// state far more often than this; 1.5s keeps the UI fresh without hammering
/// `/status`.
pub const POLL_INTERVAL_MS: u64 = 1500;

/// Broadcast channel capacity for poller events.
pub const EVENT_BUS_CAPACITY: usize = 64;

// =============================================================================
// RENDERING
// =============================================================================

/// Maximum nesting depth rendered from backend metadata. Anything deeper is
/// collapsed into a truncation leaf.
pub const RENDER_MAX_DEPTH: usize = 3;

/// Maximum entries rendered per object or array. The remainder is summarized
/// in a single "and N more" leaf.
pub const RENDER_MAX_ENTRIES: usize = 50;
