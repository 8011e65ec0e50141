use std::path::Path;
use std::sync::Arc;

use futures_util::future::join_all;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::{
    args::LoadArgs,
    domain::{UserContext, WorkloadPlan},
    error::{AppError, AppResult, MetricsError},
    http::{SenderConfig, build_worker_clients, spawn_workers},
    metrics::setup_metrics_collector,
    report::{Report, RunInfo, print_report, write_report_json},
    session::select_source,
};

use super::RunPhase;

/// Runs a full load test: acquire sessions, dispatch, wait for every worker,
/// then print (and optionally export) the report.
///
/// # Errors
///
/// Returns an error for fatal startup problems (no sessions, invalid
/// settings, client construction) or when the report cannot be written.
/// Request failures never end a run.
pub async fn run_load(args: &LoadArgs) -> AppResult<Report> {
    let source = select_source(args)?;
    info!("Acquiring user sessions ({})", source.name());
    let users = source.acquire().await?;

    let mut phase = RunPhase::Planned;
    let report = execute_run(args, users, &mut phase).await?;

    print_report(&report);
    if let Some(path) = args.output.as_deref() {
        write_report_json(Path::new(path), &report).await?;
        info!("Report written to {}", path);
    }
    phase.advance();

    Ok(report)
}

/// Plans the run over `users`, fans out the workers and builds the report
/// from the final snapshot. Leaves `phase` at [`RunPhase::Reported`].
///
/// # Errors
///
/// Returns an error when the plan or sender settings are invalid, a worker
/// client cannot be built, or the metrics collector dies.
pub async fn execute_run(
    args: &LoadArgs,
    users: Vec<UserContext>,
    phase: &mut RunPhase,
) -> AppResult<Report> {
    let config = SenderConfig::from_args(args)?;
    let plan = WorkloadPlan::new(args.requests.get(), args.concurrency.get(), users.len())?;
    info!(
        "Planned {} requests: {} workers x {} iterations over {} users",
        plan.total_requests(),
        plan.concurrency(),
        plan.iterations_per_worker(),
        plan.pool_size()
    );
    if plan.dropped_requests() > 0 {
        warn!(
            "{} requests will not be sent ({} is not divisible by {})",
            plan.dropped_requests(),
            plan.total_requests(),
            plan.concurrency()
        );
    }

    let users: Arc<[UserContext]> = Arc::from(users);
    let (outcomes, collector) =
        setup_metrics_collector(plan.dispatched_requests(), args.progress_interval);

    let clients = match build_worker_clients(&config, plan) {
        Ok(clients) => clients,
        Err(err) => {
            collector.abort();
            return Err(err);
        }
    };

    let started = Instant::now();
    let handles = spawn_workers(&config, plan, clients, &users, &outcomes);
    // Workers hold the only remaining senders; the collector ends with them.
    drop(outcomes);
    phase.advance();

    let mut issued: usize = 0;
    for result in join_all(handles).await {
        match result {
            Ok(summary) => {
                debug!(
                    "Worker {} finished after {} requests",
                    summary.worker_id, summary.issued
                );
                issued = issued.saturating_add(summary.issued);
            }
            Err(err) => error!("Worker task failed: {}", err),
        }
    }
    let elapsed = started.elapsed();

    let snapshot = collector
        .await
        .map_err(|err| AppError::metrics(MetricsError::CollectorJoin { source: err }))?;
    phase.advance();
    if issued != plan.dispatched_requests() {
        warn!(
            "Workers issued {} of {} planned requests",
            issued,
            plan.dispatched_requests()
        );
    }

    let run_info = RunInfo {
        target: config.target.to_string(),
        plan,
    };
    let report = Report::generate(&snapshot, &run_info, elapsed, args.top_errors.get());
    phase.advance();

    Ok(report)
}
