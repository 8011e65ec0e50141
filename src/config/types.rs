use std::time::Duration;

use serde::Deserialize;

use crate::args::SessionMode;
use crate::args::parsers::parse_duration_value;
use crate::domain::TargetProduct;
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub requests: Option<usize>,
    pub concurrency: Option<usize>,
    pub connect_timeout: Option<DurationValue>,
    pub read_timeout: Option<DurationValue>,
    pub progress_interval: Option<DurationValue>,
    pub sessions: Option<SessionMode>,
    pub users_file: Option<String>,
    pub payment_method: Option<String>,
    pub top_errors: Option<usize>,
    pub output: Option<String>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
    pub login: Option<LoginConfig>,
}

/// `[login]` section used when sessions are acquired by logging in.
#[derive(Debug, Deserialize)]
pub struct LoginConfig {
    pub auth_url: String,
    pub user_url: String,
    #[serde(default)]
    pub credentials: Vec<CredentialConfig>,
    pub target_product: TargetProduct,
}

#[derive(Debug, Deserialize)]
pub struct CredentialConfig {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}
