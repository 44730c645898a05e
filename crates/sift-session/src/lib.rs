//! # sift-session
//!
//! Orchestration layer of the sift dashboard client.
//!
//! [`StatusPoller`] mirrors the backend's indexing job state at a fixed
//! interval and turns the Scanning→Finished level transition into a
//! one-shot edge event. [`SearchSession`] owns the query/results/listing
//! state, arbitrates concurrent responses by issue order, and consumes the
//! poller's events. Both talk to the backend only through
//! `sift_client::ApiBackend`.

pub mod poller;
pub mod session;

pub use poller::{PollerConfig, PollerEvent, PollerHandle, StatusPoller};
pub use session::{SearchSession, SessionState};
