use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::domain::UserContext;
use crate::error::{AppError, AppResult, SessionError};

use super::SessionSource;

/// Reads the JSON array written by the data preparation step.
#[derive(Debug, Clone)]
pub struct FileSessions {
    path: PathBuf,
}

impl FileSessions {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionSource for FileSessions {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn acquire(&self) -> AppResult<Vec<UserContext>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| {
                let path = self.path.clone();
                if err.kind() == ErrorKind::NotFound {
                    AppError::session(SessionError::UsersFileMissing { path, source: err })
                } else {
                    AppError::session(SessionError::ReadUsersFile { path, source: err })
                }
            })?;
        let users: Vec<UserContext> = serde_json::from_str(&content).map_err(|err| {
            AppError::session(SessionError::ParseUsersFile {
                path: self.path.clone(),
                source: err,
            })
        })?;
        if users.is_empty() {
            return Err(AppError::session(SessionError::UsersFileEmpty {
                path: self.path.clone(),
            }));
        }
        info!(
            "Loaded {} user context(s) from {}",
            users.len(),
            self.path.display()
        );
        Ok(users)
    }
}
