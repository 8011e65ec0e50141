use crate::error::ValidationError;

/// Per-worker request assignment, fixed before dispatch.
///
/// `iterations_per_worker` is `total_requests / concurrency`. The remainder is
/// not redistributed: a 103 request run at concurrency 10 issues 100 requests.
/// Capacity runs have always been sized this way, so the truncation is kept
/// and surfaced through [`WorkloadPlan::dropped_requests`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadPlan {
    total_requests: usize,
    concurrency: usize,
    iterations_per_worker: usize,
    pool_size: usize,
}

impl WorkloadPlan {
    /// Computes the plan for a run.
    ///
    /// # Errors
    ///
    /// Returns an error when either count is zero, when concurrency exceeds
    /// the total request count, or when the user pool is empty.
    pub fn new(
        total_requests: usize,
        concurrency: usize,
        pool_size: usize,
    ) -> Result<Self, ValidationError> {
        if total_requests == 0 || concurrency == 0 {
            return Err(ValidationError::ValueTooSmall { min: 1 });
        }
        if concurrency > total_requests {
            return Err(ValidationError::ConcurrencyExceedsRequests {
                concurrency,
                requests: total_requests,
            });
        }
        if pool_size == 0 {
            return Err(ValidationError::EmptyUserPool);
        }
        let iterations_per_worker = total_requests.checked_div(concurrency).unwrap_or(0);
        Ok(Self {
            total_requests,
            concurrency,
            iterations_per_worker,
            pool_size,
        })
    }

    #[must_use]
    pub const fn total_requests(&self) -> usize {
        self.total_requests
    }

    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    #[must_use]
    pub const fn iterations_per_worker(&self) -> usize {
        self.iterations_per_worker
    }

    #[must_use]
    pub const fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Requests that will actually be issued across all workers.
    #[must_use]
    pub const fn dispatched_requests(&self) -> usize {
        self.iterations_per_worker.saturating_mul(self.concurrency)
    }

    #[must_use]
    pub const fn dropped_requests(&self) -> usize {
        self.total_requests
            .saturating_sub(self.dispatched_requests())
    }

    /// Index into the user pool for a worker's `iteration`. Contexts are
    /// reused cyclically, every worker walking the pool from the start.
    #[must_use]
    pub const fn user_index(&self, iteration: usize) -> usize {
        match iteration.checked_rem(self.pool_size) {
            Some(index) => index,
            None => 0,
        }
    }
}
