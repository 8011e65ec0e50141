use std::error::Error as _;

use reqwest::{Client, Url};
use tokio::time::Instant;

use crate::domain::{ErrorKind, RequestOutcome, UserContext, truncate_detail};

use super::builders::build_order_request;

/// Statuses counted as a created order.
pub(crate) const SUCCESS_STATUSES: [u16; 2] = [200, 201];

const TIMEOUT_DETAIL: &str = "Request timeout";

/// Sends one order and classifies the result. The clock covers request
/// dispatch through the last byte of the response body.
pub(crate) async fn execute_order(
    client: &Client,
    target: &Url,
    user: &UserContext,
    payment_method: &str,
) -> RequestOutcome {
    let start = Instant::now();
    let request = match build_order_request(client, target, user, payment_method) {
        Ok(request) => request,
        Err(err) => return classify_transport_error(&err, elapsed_ms(start)),
    };

    match client.execute(request).await {
        Ok(response) => {
            let status = response.status().as_u16();
            match response.text().await {
                Ok(body) => classify_response(status, &body, elapsed_ms(start)),
                Err(err) => classify_transport_error(&err, elapsed_ms(start)),
            }
        }
        Err(err) => classify_transport_error(&err, elapsed_ms(start)),
    }
}

/// Classifies a completed HTTP exchange.
pub(crate) fn classify_response(status: u16, body: &str, latency_ms: f64) -> RequestOutcome {
    if SUCCESS_STATUSES.contains(&status) {
        return RequestOutcome::success(latency_ms);
    }
    RequestOutcome::failure(latency_ms, ErrorKind::Http(status), &extract_error_detail(body))
}

/// Classifies a request that never produced a complete response.
pub(crate) fn classify_transport_error(err: &reqwest::Error, latency_ms: f64) -> RequestOutcome {
    if err.is_timeout() {
        return RequestOutcome::failure(latency_ms, ErrorKind::Timeout, TIMEOUT_DETAIL);
    }
    let kind = if err.is_connect() || err.is_request() {
        ErrorKind::Connection
    } else {
        ErrorKind::Exception
    };
    RequestOutcome::failure(latency_ms, kind, &describe_error(err))
}

/// Human message from an error body: `message`, then `error`, then the raw
/// body, truncated.
pub(crate) fn extract_error_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["message", "error"] {
            if let Some(text) = value.get(field).and_then(serde_json::Value::as_str)
                && !text.is_empty()
            {
                return truncate_detail(text);
            }
        }
    }
    truncate_detail(body)
}

fn describe_error(err: &reqwest::Error) -> String {
    let mut cause = err.source();
    while let Some(next) = cause.and_then(|current| current.source()) {
        cause = Some(next);
    }
    cause.map_or_else(|| err.to_string(), |root| format!("{} ({})", root, err))
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
