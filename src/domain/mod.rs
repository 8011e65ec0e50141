//! Run-scoped domain values: user contexts, the workload plan, and request
//! outcomes.
mod outcome;
mod plan;
mod user;


pub use outcome::{DETAIL_MAX_CHARS, ErrorKind, RequestOutcome, truncate_detail};
pub use plan::WorkloadPlan;
pub use user::{Identifier, TargetProduct, UserContext};
