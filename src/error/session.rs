use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(
        "User data file '{path}' not found. Run the data preparation step first: {source}"
    )]
    UsersFileMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read user data file '{path}': {source}")]
    ReadUsersFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse user data file '{path}': {source}")]
    ParseUsersFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("No users found in '{path}'. Run the data preparation step first.")]
    UsersFileEmpty { path: PathBuf },
    #[error("Login produced no usable sessions ({attempted} credential(s) attempted).")]
    NoLoginSessions { attempted: usize },
    #[error("Login for '{email}' failed with status {status}: {detail}")]
    LoginRejected {
        email: String,
        status: u16,
        detail: String,
    },
    #[error("Login response for '{email}' carried no token.")]
    TokenMissing { email: String },
    #[error("Token for '{email}' has no decodable userId claim.")]
    TokenClaimMissing { email: String },
    #[error("No address found for '{email}' (status {status}).")]
    AddressMissing { email: String, status: u16 },
    #[error("Session request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
