//! Live spot-list feed.
//!
//! The UI never fetches directly on its render path; a feed task
//! pushes snapshots over a channel. How the feed stays fresh is a
//! configuration choice (`RefreshMode`), not a hardwired interval, so
//! a push transport can slot in later without touching the UI.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::backend::ParkingBackend;
use crate::core::models::ParkingSpot;

/// How the feed keeps its snapshot current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RefreshMode {
    /// Unconditional full re-fetch on a fixed interval.
    Polling { interval_secs: u64 },
    /// Only fetch when explicitly asked (initial load and
    /// `refresh_now`).
    Manual,
}

impl Default for RefreshMode {
    fn default() -> Self {
        Self::Polling { interval_secs: 30 }
    }
}

#[derive(Debug, Clone)]
pub enum SpotEvent {
    Snapshot(Vec<ParkingSpot>),
    /// A fetch failed; the last snapshot stays valid.
    Error(String),
}

enum FeedCommand {
    Refresh,
    Stop,
}

/// Handle to the background feed task.
pub struct SpotFeed {
    cmd_tx: mpsc::UnboundedSender<FeedCommand>,
}

impl SpotFeed {
    /// Spawn the feed task. An initial snapshot is fetched
    /// immediately; afterwards the task follows `mode`.
    pub fn start(
        backend: Arc<dyn ParkingBackend>,
        mode: RefreshMode,
        tx: mpsc::Sender<SpotEvent>,
    ) -> Self {
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            if !fetch_and_send(&backend, &tx).await {
                return;
            }

            loop {
                let command = match mode {
                    RefreshMode::Polling { interval_secs } => {
                        tokio::select! {
                            cmd = cmd_rx.recv() => cmd,
                            _ = tokio::time::sleep(Duration::from_secs(interval_secs)) => {
                                Some(FeedCommand::Refresh)
                            }
                        }
                    }
                    RefreshMode::Manual => cmd_rx.recv().await,
                };

                match command {
                    Some(FeedCommand::Refresh) => {
                        if !fetch_and_send(&backend, &tx).await {
                            break;
                        }
                    }
                    Some(FeedCommand::Stop) | None => break,
                }
            }
        });

        Self { cmd_tx }
    }

    /// Force an immediate re-fetch, used right after a user action so
    /// the display does not wait for the next poll tick.
    pub fn refresh_now(&self) {
        let _ = self.cmd_tx.send(FeedCommand::Refresh);
    }

    pub fn stop(&self) {
        let _ = self.cmd_tx.send(FeedCommand::Stop);
    }
}

/// Returns false once the receiver is gone and the task should end.
async fn fetch_and_send(
    backend: &Arc<dyn ParkingBackend>,
    tx: &mpsc::Sender<SpotEvent>,
) -> bool {
    let event = match backend.list().await {
        Ok(spots) => {
            tracing::debug!(count = spots.len(), "Fetched spot snapshot");
            SpotEvent::Snapshot(spots)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Spot fetch failed");
            SpotEvent::Error(e.to_string())
        }
    };

    tx.send(event).await.is_ok()
}
