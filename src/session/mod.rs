//! Sources for the user-context pool a run draws from.
mod file;
mod jwt;
mod login;


use async_trait::async_trait;

use crate::args::{LoadArgs, SessionMode};
use crate::domain::UserContext;
use crate::error::{AppError, AppResult, ConfigError};

pub use file::FileSessions;
pub use login::LoginSessions;

/// Produces the ready-to-use user contexts before any load is generated.
#[async_trait]
pub trait SessionSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns every usable context, in a stable order.
    ///
    /// # Errors
    ///
    /// Returns an error when no usable context can be produced.
    async fn acquire(&self) -> AppResult<Vec<UserContext>>;
}

/// Picks the source named by `--sessions`.
///
/// # Errors
///
/// Returns an error when login sessions are requested without login settings.
pub fn select_source(args: &LoadArgs) -> AppResult<Box<dyn SessionSource>> {
    match args.sessions {
        SessionMode::File => Ok(Box::new(FileSessions::new(&args.users_file))),
        SessionMode::Login => {
            let settings = args
                .login
                .clone()
                .ok_or_else(|| AppError::config(ConfigError::LoginSectionMissing))?;
            Ok(Box::new(LoginSessions::new(settings)?))
        }
    }
}
