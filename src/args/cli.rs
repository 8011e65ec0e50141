use clap::Parser;
use std::time::Duration;

use super::defaults::{DEFAULT_ORDER_URL, DEFAULT_PAYMENT_METHOD, DEFAULT_USERS_FILE};
use super::parsers::{parse_bool_env, parse_duration_arg, parse_positive_usize};
use super::types::{LoginSettings, PositiveUsize, SessionMode};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Concurrent order-creation load tester: fixed worker fan-out, lossless outcome aggregation, and latency/throughput capacity reports."
)]
pub struct LoadArgs {
    /// Order-creation endpoint to POST to
    #[arg(long, short, env = "ORDERSTORM_URL", default_value = DEFAULT_ORDER_URL)]
    pub url: String,

    /// Total requests to plan (split evenly across workers; any remainder is not sent)
    #[arg(
        long = "requests",
        short = 'n',
        env = "ORDERSTORM_REQUESTS",
        default_value = "5000",
        value_parser = parse_positive_usize
    )]
    pub requests: PositiveUsize,

    /// Number of concurrent workers, each with its own connection pool
    #[arg(
        long = "concurrency",
        short = 'c',
        env = "ORDERSTORM_CONCURRENCY",
        default_value = "100",
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// Timeout for establishing a connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        env = "ORDERSTORM_CONNECT_TIMEOUT",
        default_value = "5s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Timeout for each read while waiting on the response (supports ms/s/m/h)
    #[arg(
        long = "read-timeout",
        env = "ORDERSTORM_READ_TIMEOUT",
        default_value = "30s",
        value_parser = parse_duration_arg
    )]
    pub read_timeout: Duration,

    /// How user sessions are obtained
    #[arg(long = "sessions", default_value = "file", value_enum)]
    pub sessions: SessionMode,

    /// User context file produced by the data preparation step
    #[arg(long = "users-file", short = 'f', default_value = DEFAULT_USERS_FILE)]
    pub users_file: String,

    /// Payment method sent with every order
    #[arg(long = "payment-method", default_value = DEFAULT_PAYMENT_METHOD)]
    pub payment_method: String,

    /// Number of error kinds listed in the summary
    #[arg(long = "top-errors", default_value = "5", value_parser = parse_positive_usize)]
    pub top_errors: PositiveUsize,

    /// Interval between progress log lines (supports ms/s/m/h)
    #[arg(
        long = "progress-interval",
        default_value = "5s",
        value_parser = parse_duration_arg
    )]
    pub progress_interval: Duration,

    /// Write the final report as JSON to this path
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Path to config file (TOML/JSON). Defaults to ./orderstorm.toml or ./orderstorm.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by ORDERSTORM_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,

    #[arg(skip)]
    pub login: Option<LoginSettings>,
}
