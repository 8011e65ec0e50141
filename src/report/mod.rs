//! Post-run report: throughput, percentiles, failure breakdown and the
//! qualitative assessment, plus console and JSON output.
mod export;
mod stats;
mod summary;


use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::WorkloadPlan;
use crate::metrics::MetricsSnapshot;

pub use export::write_report_json;
pub use stats::{ThroughputTier, percentile, success_rate, throughput};
pub use summary::{print_report, render_report_lines};

/// Static facts about the run echoed in the report.
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub target: String,
    pub plan: WorkloadPlan,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LatencySummary {
    pub avg_ms: f64,
    pub p50_ms: f64,
    pub p90_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorKindCount {
    pub kind: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FailureBreakdown {
    pub reservation_failed: u64,
    pub timeout: u64,
    pub other: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanEcho {
    pub total_requests: usize,
    pub concurrency: usize,
    pub requests_per_worker: usize,
    pub dispatched_requests: usize,
    pub dropped_requests: usize,
    pub user_pool: usize,
}

/// Everything printed or exported at the end of a run. Computed once from
/// the final snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub target: String,
    pub plan: PlanEcho,
    pub duration_secs: f64,
    pub total_completed: u64,
    pub success: u64,
    pub failed: u64,
    pub success_rate: f64,
    pub failures: FailureBreakdown,
    pub top_errors: Vec<ErrorKindCount>,
    pub throughput: f64,
    pub tier: ThroughputTier,
    pub latency: LatencySummary,
}

impl Report {
    /// Builds the report for a finished run. `top_errors` bounds the number
    /// of error kinds listed.
    #[must_use]
    pub fn generate(
        snapshot: &MetricsSnapshot,
        info: &RunInfo,
        elapsed: Duration,
        top_errors: usize,
    ) -> Self {
        let duration_secs = elapsed.as_secs_f64();
        let total_completed = snapshot.total_recorded();
        let throughput = throughput(total_completed, duration_secs);
        let plan = &info.plan;

        Self {
            generated_at: Utc::now(),
            target: info.target.clone(),
            plan: PlanEcho {
                total_requests: plan.total_requests(),
                concurrency: plan.concurrency(),
                requests_per_worker: plan.iterations_per_worker(),
                dispatched_requests: plan.dispatched_requests(),
                dropped_requests: plan.dropped_requests(),
                user_pool: plan.pool_size(),
            },
            duration_secs,
            total_completed,
            success: snapshot.success_count(),
            failed: snapshot.failed_count(),
            success_rate: success_rate(snapshot.success_count(), total_completed),
            failures: FailureBreakdown {
                reservation_failed: snapshot.reservation_failed_count(),
                timeout: snapshot.timeout_count(),
                other: snapshot.other_error_count(),
            },
            top_errors: stats::top_error_kinds(snapshot.error_kinds(), top_errors),
            throughput,
            tier: ThroughputTier::classify(throughput),
            latency: stats::summarize_latencies(snapshot.latencies()),
        }
    }
}
