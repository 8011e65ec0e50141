use std::fmt;

/// Upper bound on the characters kept from any failure description.
pub const DETAIL_MAX_CHARS: usize = 100;

const RESERVATION_MARKERS: [&str; 2] = ["insufficient", "reserve"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    None,
    Timeout,
    Connection,
    Http(u16),
    Exception,
}

impl ErrorKind {
    /// Key used in the error-kind histogram. `None` for successful outcomes.
    #[must_use]
    pub fn histogram_key(self) -> Option<String> {
        match self {
            ErrorKind::None => None,
            ErrorKind::Timeout => Some("timeout".to_owned()),
            ErrorKind::Connection => Some("connection_error".to_owned()),
            ErrorKind::Http(status) => Some(format!("http_{}", status)),
            ErrorKind::Exception => Some("exception".to_owned()),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.histogram_key() {
            Some(key) => f.write_str(&key),
            None => f.write_str("none"),
        }
    }
}

/// Result of exactly one dispatched request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutcome {
    success: bool,
    latency_ms: f64,
    error_kind: ErrorKind,
    error_detail: String,
    reservation_failure: bool,
}

impl RequestOutcome {
    #[must_use]
    pub const fn success(latency_ms: f64) -> Self {
        Self {
            success: true,
            latency_ms,
            error_kind: ErrorKind::None,
            error_detail: String::new(),
            reservation_failure: false,
        }
    }

    /// Builds a failed outcome. The detail is truncated and scanned for the
    /// reservation markers; that scan is a text heuristic over whatever the
    /// backend put in its message, not a structured error code.
    #[must_use]
    pub fn failure(latency_ms: f64, error_kind: ErrorKind, detail: &str) -> Self {
        let error_detail = truncate_detail(detail);
        let reservation_failure = is_reservation_detail(&error_detail);
        Self {
            success: false,
            latency_ms,
            error_kind,
            error_detail,
            reservation_failure,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub const fn latency_ms(&self) -> f64 {
        self.latency_ms
    }

    #[must_use]
    pub const fn error_kind(&self) -> ErrorKind {
        self.error_kind
    }

    #[must_use]
    pub fn error_detail(&self) -> &str {
        &self.error_detail
    }

    #[must_use]
    pub const fn is_reservation_failure(&self) -> bool {
        self.reservation_failure
    }
}

#[must_use]
pub fn truncate_detail(detail: &str) -> String {
    detail.chars().take(DETAIL_MAX_CHARS).collect()
}

fn is_reservation_detail(detail: &str) -> bool {
    let lowered = detail.to_lowercase();
    RESERVATION_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}
