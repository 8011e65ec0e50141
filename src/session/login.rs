use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::args::{Credential, DEFAULT_USER_AGENT, LoginSettings};
use crate::domain::{Identifier, UserContext};
use crate::error::{AppError, AppResult, HttpError, SessionError};
use crate::http::workload::extract_error_detail;

use super::SessionSource;
use super::jwt::decode_user_id;

/// Timeout applied to each setup request. Setup traffic is never measured.
pub const LOGIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Logs each configured account in and resolves its address before the run.
#[derive(Debug, Clone)]
pub struct LoginSessions {
    client: Client,
    settings: LoginSettings,
}

impl LoginSessions {
    /// # Errors
    ///
    /// Returns an error when the setup HTTP client cannot be built.
    pub fn new(settings: LoginSettings) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(LOGIN_REQUEST_TIMEOUT)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;
        Ok(Self { client, settings })
    }

    async fn session_for(&self, credential: &Credential) -> Result<UserContext, SessionError> {
        let token = self.login(credential).await?;
        let user_id = decode_user_id(&token).ok_or_else(|| SessionError::TokenClaimMissing {
            email: credential.email.clone(),
        })?;
        let address_id = self.first_address(&credential.email, &token).await?;
        Ok(UserContext {
            user_id,
            address_id,
            auth_token: token,
            target_product: self.settings.target_product.clone(),
        })
    }

    async fn login(&self, credential: &Credential) -> Result<String, SessionError> {
        let url = join_path(&self.settings.auth_url, "login");
        let response = self
            .client
            .post(url)
            .json(&LoginBody {
                email: &credential.email,
                password: &credential.password,
            })
            .send()
            .await
            .map_err(|err| SessionError::Request { source: err })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| SessionError::Request { source: err })?;
        if status != StatusCode::OK {
            return Err(SessionError::LoginRejected {
                email: credential.email.clone(),
                status: status.as_u16(),
                detail: extract_error_detail(&body),
            });
        }
        extract_token(&body).ok_or_else(|| SessionError::TokenMissing {
            email: credential.email.clone(),
        })
    }

    async fn first_address(&self, email: &str, token: &str) -> Result<Identifier, SessionError> {
        let url = join_path(&self.settings.user_url, "address/getAllAddresses");
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| SessionError::Request { source: err })?;
        let status = response.status();
        let missing = || SessionError::AddressMissing {
            email: email.to_owned(),
            status: status.as_u16(),
        };
        if status != StatusCode::OK {
            return Err(missing());
        }
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|err| SessionError::Request { source: err })?;
        body.get(0)
            .and_then(|entry| entry.get("id"))
            .and_then(|id| serde_json::from_value::<Identifier>(id.clone()).ok())
            .ok_or_else(missing)
    }
}

#[async_trait]
impl SessionSource for LoginSessions {
    fn name(&self) -> &'static str {
        "login"
    }

    async fn acquire(&self) -> AppResult<Vec<UserContext>> {
        let attempted = self.settings.credentials.len();
        let mut users = Vec::with_capacity(attempted);
        for credential in &self.settings.credentials {
            match self.session_for(credential).await {
                Ok(user) => {
                    debug!("Session ready for {} (userId {})", credential.email, user.user_id);
                    users.push(user);
                }
                Err(err) => warn!("Skipping {}: {}", credential.email, err),
            }
        }
        if users.is_empty() {
            return Err(AppError::session(SessionError::NoLoginSessions { attempted }));
        }
        info!("Prepared {}/{} login session(s)", users.len(), attempted);
        Ok(users)
    }
}

pub(super) fn extract_token(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["token", "accessToken"].into_iter().find_map(|field| {
        value
            .get(field)
            .and_then(serde_json::Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
    })
}

fn join_path(base: &Url, suffix: &str) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), suffix)
}
