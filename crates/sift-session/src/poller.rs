//! Fixed-interval status poller with finished-edge detection.
//!
//! The backend only exposes a level (`GET /status`); consumers need an edge
//! (the moment a scan completes) to refresh exactly once. The poller keeps
//! the previous sample and compares phases on every tick, so a
//! Scanning→Finished transition that lands between two polls is still seen.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use sift_client::ApiBackend;
use sift_core::{defaults, IndexPhase, IndexStatus};

/// Configuration for the status poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Polling interval in milliseconds.
    pub interval_ms: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_ms: defaults::POLL_INTERVAL_MS,
        }
    }
}

impl PollerConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `SIFT_POLL_INTERVAL_MS` | `1500` | Status poll interval |
    pub fn from_env() -> Self {
        let interval_ms = std::env::var("SIFT_POLL_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::POLL_INTERVAL_MS);
        Self { interval_ms }
    }

    /// Create a new config with a custom poll interval.
    pub fn with_interval(mut self, ms: u64) -> Self {
        self.interval_ms = ms;
        self
    }
}

/// Event emitted by the status poller.
#[derive(Debug, Clone)]
pub enum PollerEvent {
    /// A fresh status sample was mirrored.
    Status(IndexStatus),
    /// The Scanning→Finished edge was observed. Fires at most once per
    /// scanning episode; this is the only automatic trigger for a
    /// file-listing refetch.
    IndexingFinished(IndexStatus),
    /// Poller started.
    PollerStarted,
    /// Poller stopped.
    PollerStopped,
}

/// Handle for a running poller.
///
/// Dropping the handle stops the poller: no tick runs after the shutdown
/// signal is observed.
pub struct PollerHandle {
    shutdown_tx: mpsc::Sender<()>,
    event_rx: broadcast::Receiver<PollerEvent>,
    status_rx: watch::Receiver<IndexStatus>,
}

impl PollerHandle {
    /// Signal the poller to shut down gracefully.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }

    /// Get a receiver for poller events.
    pub fn events(&self) -> broadcast::Receiver<PollerEvent> {
        self.event_rx.resubscribe()
    }

    /// Watch the mirrored status (last-known-good; survives failed polls).
    pub fn status(&self) -> watch::Receiver<IndexStatus> {
        self.status_rx.clone()
    }
}

/// Fixed-interval poller of the backend indexing job state.
pub struct StatusPoller<B: ApiBackend> {
    backend: Arc<B>,
    config: PollerConfig,
    event_tx: broadcast::Sender<PollerEvent>,
    status_tx: watch::Sender<IndexStatus>,
}

impl<B: ApiBackend + 'static> StatusPoller<B> {
    /// Create a new poller. Nothing runs until [`StatusPoller::start`].
    pub fn new(backend: Arc<B>, config: PollerConfig) -> Self {
        let (event_tx, _) = broadcast::channel(defaults::EVENT_BUS_CAPACITY);
        let (status_tx, _) = watch::channel(IndexStatus::default());
        Self {
            backend,
            config,
            event_tx,
            status_tx,
        }
    }

    /// Start polling and return a handle for control.
    pub fn start(self) -> PollerHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
        let event_rx = self.event_tx.subscribe();
        let status_rx = self.status_tx.subscribe();

        tokio::spawn(async move {
            self.run(&mut shutdown_rx).await;
        });

        PollerHandle {
            shutdown_tx,
            event_rx,
            status_rx,
        }
    }

    async fn run(&self, shutdown_rx: &mut mpsc::Receiver<()>) {
        info!(interval_ms = self.config.interval_ms, "Status poller started");
        let _ = self.event_tx.send(PollerEvent::PollerStarted);

        let interval = Duration::from_millis(self.config.interval_ms);
        let mut previous: Option<IndexStatus> = None;

        loop {
            // recv() also returns None when the handle is dropped.
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Status poller received shutdown signal");
                    break;
                }
                _ = sleep(interval) => {}
            }

            match self.backend.status().await {
                Ok(sample) => {
                    let finished_edge = matches!(
                        (previous.as_ref().map(|p| p.phase), sample.phase),
                        (Some(IndexPhase::Scanning), IndexPhase::Finished)
                    );

                    self.status_tx.send_replace(sample.clone());
                    let _ = self.event_tx.send(PollerEvent::Status(sample.clone()));

                    if finished_edge {
                        debug!(
                            current = sample.current,
                            total = sample.total,
                            "Indexing finished edge observed"
                        );
                        let _ = self
                            .event_tx
                            .send(PollerEvent::IndexingFinished(sample.clone()));
                    }

                    previous = Some(sample);
                }
                Err(e) => {
                    // Transient failure: keep polling, keep last-known-good.
                    warn!(error = %e, "Status poll failed");
                }
            }
        }

        let _ = self.event_tx.send(PollerEvent::PollerStopped);
        info!("Status poller stopped");
    }
}
