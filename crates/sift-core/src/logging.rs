//! Structured logging field name constants for the sift client.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log queries work identically across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Session-level failure, requires user attention |
//! | WARN  | Recoverable issue (failed poll, stale response discarded) |
//! | INFO  | Lifecycle events (poller start/stop), operation completions |
//! | DEBUG | Decision points, request parameters, config choices |
//! | TRACE | Per-item data (individual results, render nodes) |

/// Correlation ID attached to each backend request.
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "client", "session", "poller"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "http_backend", "status_poller", "search_session"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "search", "status", "files", "refresh_keywords"
pub const OPERATION: &str = "op";

/// Search query text.
pub const QUERY: &str = "query";

/// Query mode wire tag ("default", "regex", "deep").
pub const MODE: &str = "mode";

/// Indexing phase observed by the poller.
pub const PHASE: &str = "phase";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a search or listing.
pub const RESULT_COUNT: &str = "result_count";

/// Sequence number used for last-write-wins arbitration.
pub const SEQ: &str = "seq";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
