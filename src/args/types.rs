use clap::ValueEnum;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use crate::domain::TargetProduct;
use crate::error::ValidationError;

/// Where the user-context pool comes from.
#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Read contexts written by the preparation step.
    File,
    /// Log in with configured credentials before the run.
    Login,
}

impl SessionMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SessionMode::File => "file",
            SessionMode::Login => "login",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

/// Settings for login-based session acquisition, only available from the
/// config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSettings {
    pub auth_url: Url,
    pub user_url: Url,
    pub credentials: Vec<Credential>,
    pub target_product: TargetProduct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveUsize(NonZeroUsize);

impl PositiveUsize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PositiveUsize {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(PositiveUsize)
            .ok_or(ValidationError::ValueTooSmall { min: 1 })
    }
}

impl std::str::FromStr for PositiveUsize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        PositiveUsize::try_from(value)
    }
}

impl From<PositiveUsize> for usize {
    fn from(value: PositiveUsize) -> Self {
        value.get()
    }
}
