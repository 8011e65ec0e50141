//! Core library for the `orderstorm` CLI.
//!
//! A fixed pool of workers issues authenticated order-creation requests
//! against one endpoint, every outcome is folded into a single aggregator,
//! and a capacity report (throughput, latency percentiles, failure
//! breakdown) is produced once all workers have finished. The primary
//! user-facing interface is the `orderstorm` command-line application.
pub mod app;
pub mod args;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;
pub mod session;
pub(crate) mod system;

#[cfg(test)]
mod test_support;
