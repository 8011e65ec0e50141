use std::sync::Arc;

use reqwest::{Client, Url};
use tracing::{error, trace};

use crate::{
    domain::{ErrorKind, RequestOutcome, UserContext, WorkloadPlan},
    metrics::OutcomeSender,
};

use super::super::workload::execute_order;

pub(super) struct WorkerContext {
    pub(super) worker_id: usize,
    pub(super) client: Client,
    pub(super) target: Arc<Url>,
    pub(super) payment_method: Arc<str>,
    pub(super) users: Arc<[UserContext]>,
    pub(super) plan: WorkloadPlan,
    pub(super) outcomes: OutcomeSender,
}

/// What a worker did, returned through its join handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSummary {
    pub worker_id: usize,
    pub issued: usize,
}

/// Issues the worker's share sequentially. Failures are recorded and the loop
/// moves on; nothing a single request does can end the worker early.
pub(super) async fn run_worker(context: WorkerContext) -> WorkerSummary {
    let WorkerContext {
        worker_id,
        client,
        target,
        payment_method,
        users,
        plan,
        outcomes,
    } = context;

    let mut issued: usize = 0;
    for iteration in 0..plan.iterations_per_worker() {
        let outcome = match users.get(plan.user_index(iteration)) {
            Some(user) => execute_order(&client, &target, user, &payment_method).await,
            None => {
                error!(
                    "Worker {} has no user for iteration {}",
                    worker_id, iteration
                );
                RequestOutcome::failure(0.0, ErrorKind::Exception, "user context unavailable")
            }
        };
        trace!(
            worker = worker_id,
            iteration,
            success = outcome.is_success(),
            latency_ms = outcome.latency_ms(),
            "order request finished"
        );
        outcomes.record(outcome);
        issued = issued.saturating_add(1);
    }

    WorkerSummary { worker_id, issued }
}
