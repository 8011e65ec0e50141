mod login;
mod util;

use clap::ArgMatches;

use crate::args::LoadArgs;
use crate::error::AppResult;

use self::login::build_login_settings;
use self::util::{ensure_duration, ensure_positive_usize, is_cli};
use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Values given on the command
/// line always win.
///
/// # Errors
///
/// Returns an error when config values are invalid or the `[login]` section
/// cannot be used.
pub fn apply_config(
    args: &mut LoadArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = url;
    }

    if !is_cli(matches, "requests")
        && let Some(value) = config.requests
    {
        args.requests = ensure_positive_usize(value, "requests")?;
    }

    if !is_cli(matches, "concurrency")
        && let Some(value) = config.concurrency
    {
        args.concurrency = ensure_positive_usize(value, "concurrency")?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(value) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = ensure_duration(value, "connect_timeout")?;
    }

    if !is_cli(matches, "read_timeout")
        && let Some(value) = config.read_timeout.as_ref()
    {
        args.read_timeout = ensure_duration(value, "read_timeout")?;
    }

    if !is_cli(matches, "progress_interval")
        && let Some(value) = config.progress_interval.as_ref()
    {
        args.progress_interval = ensure_duration(value, "progress_interval")?;
    }

    if !is_cli(matches, "sessions")
        && let Some(mode) = config.sessions
    {
        args.sessions = mode;
    }

    if !is_cli(matches, "users_file")
        && let Some(path) = config.users_file.clone()
    {
        args.users_file = path;
    }

    if !is_cli(matches, "payment_method")
        && let Some(method) = config.payment_method.clone()
    {
        args.payment_method = method;
    }

    if !is_cli(matches, "top_errors")
        && let Some(value) = config.top_errors
    {
        args.top_errors = ensure_positive_usize(value, "top_errors")?;
    }

    if !is_cli(matches, "output")
        && let Some(path) = config.output.clone()
    {
        args.output = Some(path);
    }

    if !is_cli(matches, "verbose")
        && let Some(value) = config.verbose
    {
        args.verbose = value;
    }

    if !is_cli(matches, "no_color")
        && let Some(value) = config.no_color
    {
        args.no_color = value;
    }

    if let Some(login) = config.login.as_ref() {
        args.login = Some(build_login_settings(login)?);
    }

    Ok(())
}
