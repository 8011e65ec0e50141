use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::MissedTickBehavior,
};
use tracing::{debug, error, info};

use crate::domain::RequestOutcome;

use super::{MetricsAggregator, MetricsSnapshot};

/// Worker-side handle into the collector. Cloned once per worker; the
/// collector finishes after the last clone is dropped.
#[derive(Debug, Clone)]
pub struct OutcomeSender {
    tx: mpsc::UnboundedSender<RequestOutcome>,
}

impl OutcomeSender {
    /// Hands an outcome to the collector. Never waits: the channel is
    /// unbounded, so the only suspension point in a worker stays the network.
    pub fn record(&self, outcome: RequestOutcome) {
        if self.tx.send(outcome).is_err() {
            error!("Metrics collector is gone; outcome was not recorded.");
        }
    }
}

/// Spawns the collector task.
///
/// The returned handle resolves to the final snapshot once every
/// [`OutcomeSender`] clone has been dropped, which makes awaiting it the join
/// barrier between dispatch and reporting. Progress is logged every
/// `progress_interval` against `expected` outcomes.
#[must_use]
pub fn setup_metrics_collector(
    expected: usize,
    progress_interval: Duration,
) -> (OutcomeSender, JoinHandle<MetricsSnapshot>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<RequestOutcome>();

    let handle = tokio::spawn(async move {
        let mut aggregator = MetricsAggregator::new();
        let mut progress = tokio::time::interval(progress_interval);
        progress.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick fires immediately.
        progress.tick().await;

        loop {
            // Tick first: a steady stream of outcomes must not starve progress.
            tokio::select! {
                biased;
                _ = progress.tick() => {
                    info!("{}/{} requests completed", aggregator.total_recorded(), expected);
                }
                maybe_outcome = rx.recv() => {
                    let Some(outcome) = maybe_outcome else {
                        break;
                    };
                    if !outcome.is_success() {
                        debug!(
                            kind = %outcome.error_kind(),
                            detail = outcome.error_detail(),
                            "request failed"
                        );
                    }
                    aggregator.record(&outcome);
                }
            }
        }

        aggregator.into_snapshot()
    });

    (OutcomeSender { tx }, handle)
}
