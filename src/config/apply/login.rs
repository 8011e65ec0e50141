use crate::args::{Credential, LoginSettings};
use crate::error::{AppError, AppResult, ConfigError};
use crate::http::parse_target_url;

use super::super::types::LoginConfig;

pub(super) fn build_login_settings(config: &LoginConfig) -> AppResult<LoginSettings> {
    if config.credentials.is_empty() {
        return Err(AppError::config(ConfigError::LoginCredentialsEmpty));
    }
    let auth_url = parse_target_url(config.auth_url.trim_end_matches('/'))?;
    let user_url = parse_target_url(config.user_url.trim_end_matches('/'))?;
    let credentials = config
        .credentials
        .iter()
        .map(|entry| Credential {
            email: entry.email.clone(),
            password: entry.password.clone(),
        })
        .collect();

    Ok(LoginSettings {
        auth_url,
        user_url,
        credentials,
        target_product: config.target_product.clone(),
    })
}
