use std::time::Duration;

use reqwest::{Client, Url, redirect};

use crate::{
    args::{DEFAULT_USER_AGENT, LoadArgs},
    error::{AppError, AppResult, HttpError, ValidationError},
};

/// Idle connections each worker may keep per host.
pub const WORKER_POOL_MAX_IDLE: usize = 10;

/// Validated request settings shared by every worker.
#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub target: Url,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub payment_method: String,
}

impl SenderConfig {
    /// Validates the target URL and payment method taken from the CLI/config.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL does not parse, is not http(s), has no
    /// host, or when the payment method is blank.
    pub fn from_args(args: &LoadArgs) -> AppResult<Self> {
        let target = parse_target_url(&args.url)?;
        let payment_method = args.payment_method.trim();
        if payment_method.is_empty() {
            return Err(AppError::validation(ValidationError::PaymentMethodEmpty));
        }
        Ok(Self {
            target,
            connect_timeout: args.connect_timeout,
            read_timeout: args.read_timeout,
            payment_method: payment_method.to_owned(),
        })
    }
}

pub(crate) fn parse_target_url(value: &str) -> AppResult<Url> {
    let parsed = Url::parse(value).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: value.to_owned(),
            source: err,
        })
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::validation(
            ValidationError::UnsupportedUrlScheme {
                url: value.to_owned(),
            },
        ));
    }
    if parsed.host_str().is_none() {
        return Err(AppError::validation(ValidationError::UrlMissingHost));
    }
    Ok(parsed)
}

/// Builds the client owned by a single worker.
///
/// Redirects are not followed and reqwest never retries on its own, so each
/// recorded latency covers exactly one request/response exchange.
///
/// # Errors
///
/// Returns an error when the TLS backend or client cannot be initialised.
pub(crate) fn build_worker_client(config: &SenderConfig) -> AppResult<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .read_timeout(config.read_timeout)
        .pool_max_idle_per_host(WORKER_POOL_MAX_IDLE)
        .redirect(redirect::Policy::none())
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}
