//! Run orchestration: session acquisition, fan-out, the join barrier and
//! report output.
mod phase;
mod runner;


pub use phase::RunPhase;
pub use runner::{execute_run, run_load};
