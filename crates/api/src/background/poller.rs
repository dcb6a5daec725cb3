//! Background snapshot poller.
//!
//! Re-fetches every watched account on a fixed interval so list reads
//! stay fresh without client-driven refreshes. Ticks are skipped when
//! no client has read the snapshot recently; polling resumes on the
//! first read after the idle window.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use adboard_meta::AdsApi;

use crate::store::SnapshotStore;

/// Snapshot polling loop.
pub struct SnapshotPoller {
    store: Arc<SnapshotStore>,
    ads: Arc<dyn AdsApi>,
    interval_secs: u64,
    idle_window_secs: i64,
}

impl SnapshotPoller {
    pub fn new(
        store: Arc<SnapshotStore>,
        ads: Arc<dyn AdsApi>,
        interval_secs: u64,
        idle_window_secs: i64,
    ) -> Self {
        Self {
            store,
            ads,
            interval_secs,
            idle_window_secs,
        }
    }

    /// Run the polling loop. Exits gracefully when the provided
    /// [`CancellationToken`] is cancelled.
    ///
    /// Load failures are logged and swallowed; the previous snapshot
    /// keeps serving until a later tick succeeds.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(
            self.interval_secs,
        ));
        // The first tick fires immediately; skip it so startup does not
        // race the first client-driven load.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Snapshot poller cancelled");
                    break;
                }
                _ = interval.tick() => {
                    if !self.store.touched_within(self.idle_window_secs) {
                        tracing::debug!("No recent readers, skipping poll tick");
                        continue;
                    }
                    if let Err(e) = self.store.load(self.ads.as_ref()).await {
                        tracing::warn!(error = %e, "Background snapshot refresh failed");
                    }
                }
            }
        }
    }
}
