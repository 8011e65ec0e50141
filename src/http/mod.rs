//! Order request execution: per-worker clients, request building, outcome
//! classification and the worker fan-out.
mod sender;
pub(crate) mod workload;


pub use sender::{
    SenderConfig, WORKER_POOL_MAX_IDLE, WorkerSummary, build_worker_clients, spawn_workers,
};
pub(crate) use sender::parse_target_url;
