mod config;
mod worker;

use std::sync::Arc;

use reqwest::Client;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::{
    domain::{UserContext, WorkloadPlan},
    error::AppResult,
    metrics::OutcomeSender,
};

pub use config::{SenderConfig, WORKER_POOL_MAX_IDLE};
pub(crate) use config::{build_worker_client, parse_target_url};
pub use worker::WorkerSummary;
use worker::{WorkerContext, run_worker};

/// Builds one client per planned worker.
///
/// Runs before any task is spawned, so a client error aborts the run with
/// nothing dispatched and client setup stays out of the measured duration.
///
/// # Errors
///
/// Returns an error when a worker client cannot be built.
pub fn build_worker_clients(config: &SenderConfig, plan: WorkloadPlan) -> AppResult<Vec<Client>> {
    let mut clients = Vec::with_capacity(plan.concurrency());
    for _ in 0..plan.concurrency() {
        clients.push(build_worker_client(config)?);
    }
    debug!("Built {} worker clients", clients.len());
    Ok(clients)
}

/// Fans out one task per client, numbered in client order.
#[must_use]
pub fn spawn_workers(
    config: &SenderConfig,
    plan: WorkloadPlan,
    clients: Vec<Client>,
    users: &Arc<[UserContext]>,
    outcomes: &OutcomeSender,
) -> Vec<JoinHandle<WorkerSummary>> {
    let target = Arc::new(config.target.clone());
    let payment_method: Arc<str> = Arc::from(config.payment_method.as_str());

    clients
        .into_iter()
        .enumerate()
        .map(|(worker_id, client)| {
            let context = WorkerContext {
                worker_id,
                client,
                target: Arc::clone(&target),
                payment_method: Arc::clone(&payment_method),
                users: Arc::clone(users),
                plan,
                outcomes: outcomes.clone(),
            };
            tokio::spawn(run_worker(context))
        })
        .collect()
}
