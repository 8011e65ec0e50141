//! Outcome aggregation: a single collector task owns the aggregator and every
//! worker feeds it through a cloned [`OutcomeSender`].
mod aggregator;
mod collector;


pub use aggregator::{MetricsAggregator, MetricsSnapshot};
pub use collector::{OutcomeSender, setup_metrics_collector};
