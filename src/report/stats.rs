use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::Serialize;

use super::{ErrorKindCount, LatencySummary};

/// Below this many samples p99 falls back to the maximum.
const P99_MIN_SAMPLES: usize = 100;
const P99: f64 = 0.99;

/// Coarse throughput band. Informational only; never fails a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThroughputTier {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl ThroughputTier {
    #[must_use]
    pub const fn classify(throughput: f64) -> Self {
        if throughput >= 500.0 {
            ThroughputTier::Excellent
        } else if throughput >= 200.0 {
            ThroughputTier::Good
        } else if throughput >= 100.0 {
            ThroughputTier::Moderate
        } else {
            ThroughputTier::Low
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            ThroughputTier::Excellent => "EXCELLENT. Throughput >= 500 req/s.",
            ThroughputTier::Good => "GOOD. Throughput >= 200 req/s, reservation path keeping up.",
            ThroughputTier::Moderate => "MODERATE. Throughput ~100 req/s. Check for bottlenecks.",
            ThroughputTier::Low => "LOW. Throughput < 100 req/s. Investigate.",
        }
    }
}

/// Completed requests per second; 0 when no time elapsed.
#[must_use]
pub const fn throughput(total_completed: u64, duration_secs: f64) -> f64 {
    if duration_secs <= 0.0 {
        return 0.0;
    }
    total_completed as f64 / duration_secs
}

/// Share of successful outcomes in percent; 0 when nothing completed.
#[must_use]
pub const fn success_rate(success: u64, total_completed: u64) -> f64 {
    if total_completed == 0 {
        return 0.0;
    }
    success as f64 / total_completed as f64 * 100.0
}

/// Nearest-rank style percentile over an ascending sample: the element at
/// `floor(len * p)`, clamped to the last one. p99 over 100 samples or fewer
/// is the maximum.
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    let Some(max) = sorted.last().copied() else {
        return 0.0;
    };
    if (p - P99).abs() < f64::EPSILON && sorted.len() <= P99_MIN_SAMPLES {
        return max;
    }
    let rank = (sorted.len() as f64 * p).floor();
    let index = (rank as usize).min(sorted.len().saturating_sub(1));
    sorted.get(index).copied().unwrap_or(max)
}

pub(super) fn summarize_latencies(samples: &[f64]) -> LatencySummary {
    if samples.is_empty() {
        return LatencySummary::default();
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let avg_ms = sorted.iter().sum::<f64>() / sorted.len() as f64;

    LatencySummary {
        avg_ms,
        p50_ms: percentile(&sorted, 0.5),
        p90_ms: percentile(&sorted, 0.9),
        p95_ms: percentile(&sorted, 0.95),
        p99_ms: percentile(&sorted, P99),
    }
}

/// Most frequent error kinds first; equal counts ordered by key.
pub(super) fn top_error_kinds(kinds: &BTreeMap<String, u64>, limit: usize) -> Vec<ErrorKindCount> {
    let mut entries: Vec<(&String, &u64)> = kinds.iter().collect();
    // BTreeMap iteration is key-ordered and the sort is stable.
    entries.sort_by_key(|(_, count)| Reverse(**count));
    entries
        .into_iter()
        .take(limit)
        .map(|(kind, count)| ErrorKindCount {
            kind: kind.clone(),
            count: *count,
        })
        .collect()
}
