//! # sift-client
//!
//! The HTTP boundary of the sift dashboard client.
//!
//! [`ApiBackend`] is the seam between orchestration and transport:
//! `sift-session` only ever talks to the trait. [`HttpBackend`] implements
//! it with reqwest against the forensic indexing backend; the `wire` module
//! normalizes the backend's loose response shapes into `sift-core` models
//! immediately after receipt, so nothing downstream branches on field-name
//! variants. A deterministic [`mock::MockBackend`] is available behind the
//! `mock` feature.

pub mod backend;
pub mod http;
#[cfg(feature = "mock")]
pub mod mock;
pub mod wire;

pub use backend::ApiBackend;
pub use http::HttpBackend;
#[cfg(feature = "mock")]
pub use mock::{MockBackend, MockCall};
