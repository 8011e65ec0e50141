use std::collections::BTreeMap;

use crate::domain::{ErrorKind, RequestOutcome};

/// Final counters and samples of a run. Only handed out by the collector once
/// every sender is gone, so readers never see a partially updated view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    success_count: u64,
    failed_count: u64,
    reservation_failed_count: u64,
    timeout_count: u64,
    other_error_count: u64,
    latencies: Vec<f64>,
    error_kinds: BTreeMap<String, u64>,
}

impl MetricsSnapshot {
    #[must_use]
    pub const fn success_count(&self) -> u64 {
        self.success_count
    }

    #[must_use]
    pub const fn failed_count(&self) -> u64 {
        self.failed_count
    }

    #[must_use]
    pub const fn reservation_failed_count(&self) -> u64 {
        self.reservation_failed_count
    }

    #[must_use]
    pub const fn timeout_count(&self) -> u64 {
        self.timeout_count
    }

    #[must_use]
    pub const fn other_error_count(&self) -> u64 {
        self.other_error_count
    }

    #[must_use]
    pub const fn total_recorded(&self) -> u64 {
        self.success_count.saturating_add(self.failed_count)
    }

    /// Latency samples in arrival order (arrival order is not meaningful).
    #[must_use]
    pub fn latencies(&self) -> &[f64] {
        &self.latencies
    }

    #[must_use]
    pub const fn error_kinds(&self) -> &BTreeMap<String, u64> {
        &self.error_kinds
    }
}

/// Accumulates outcomes. `record` takes `&mut self`: the collector task is the
/// only writer, which keeps each update a single uninterrupted unit.
#[derive(Debug, Default)]
pub struct MetricsAggregator {
    snapshot: MetricsSnapshot,
}

impl MetricsAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &RequestOutcome) {
        let state = &mut self.snapshot;
        state.latencies.push(outcome.latency_ms());

        if outcome.is_success() {
            state.success_count = state.success_count.saturating_add(1);
            return;
        }

        state.failed_count = state.failed_count.saturating_add(1);
        // Reservation wins over the timeout/other split so every failure lands
        // in exactly one bucket.
        if outcome.is_reservation_failure() {
            state.reservation_failed_count = state.reservation_failed_count.saturating_add(1);
        } else if outcome.error_kind() == ErrorKind::Timeout {
            state.timeout_count = state.timeout_count.saturating_add(1);
        } else {
            state.other_error_count = state.other_error_count.saturating_add(1);
        }

        let key = outcome
            .error_kind()
            .histogram_key()
            .unwrap_or_else(|| "unknown".to_owned());
        let count = state.error_kinds.entry(key).or_insert(0);
        *count = count.saturating_add(1);
    }

    #[must_use]
    pub const fn total_recorded(&self) -> u64 {
        self.snapshot.total_recorded()
    }

    #[must_use]
    pub fn into_snapshot(self) -> MetricsSnapshot {
        self.snapshot
    }
}
