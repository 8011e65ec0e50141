use super::{
    apply_config, load_config_file,
    types::{ConfigFile, DurationValue},
};
use clap::{CommandFactory, FromArgMatches};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::{LoadArgs, SessionMode};
use crate::domain::Identifier;
use crate::error::{AppError, AppResult, ConfigError};

fn args_from(argv: &[&str]) -> AppResult<(LoadArgs, clap::ArgMatches)> {
    let matches = LoadArgs::command().try_get_matches_from(argv)?;
    let args = LoadArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

#[test]
fn parse_toml_config_with_login_section() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("orderstorm.toml");
    let content = r#"
url = "http://localhost:8080/v1/order/create-from-cart"
requests = 1000
concurrency = 50
read_timeout = "10s"
connect_timeout = 2
sessions = "login"

[login]
auth_url = "http://localhost:8081/v1/auth/"
user_url = "http://localhost:8082/v1/user"
target_product = { product_id = 7, size_id = "M" }

[[login.credentials]]
email = "load1@example.com"
password = "secret"
"#;
    std::fs::write(&path, content)?;

    let config = load_config_file(&path)?;
    if config.requests != Some(1000) || config.concurrency != Some(50) {
        return Err(AppError::config("Unexpected requests/concurrency"));
    }
    if config.sessions != Some(SessionMode::Login) {
        return Err(AppError::config("Expected login sessions"));
    }
    let login = match config.login {
        Some(login) => login,
        None => return Err(AppError::config("Expected login section")),
    };
    if login.credentials.len() != 1 {
        return Err(AppError::config("Expected one credential"));
    }
    if login.target_product.product_id != Identifier::Number(7) {
        return Err(AppError::config("Unexpected product id"));
    }
    if login.target_product.size_id != Identifier::Text("M".to_owned()) {
        return Err(AppError::config("Unexpected size id"));
    }

    Ok(())
}

#[test]
fn parse_json_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("orderstorm.json");
    let content = r#"{
  "url": "http://127.0.0.1:9000/orders",
  "users_file": "fixtures/users.json",
  "payment_method": "CARD",
  "read_timeout": "1500ms",
  "top_errors": 3
}"#;
    std::fs::write(&path, content)?;

    let config = load_config_file(&path)?;
    if config.users_file.as_deref() != Some("fixtures/users.json") {
        return Err(AppError::config("Unexpected users_file"));
    }
    if config.payment_method.as_deref() != Some("CARD") {
        return Err(AppError::config("Unexpected payment_method"));
    }
    match config.read_timeout {
        Some(DurationValue::Text(ref text)) if text == "1500ms" => {}
        other => {
            return Err(AppError::config(format!(
                "Unexpected read_timeout: {:?}",
                other
            )));
        }
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("orderstorm.yaml");
    std::fs::write(&path, "url: nope")?;

    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        Err(err) => Err(AppError::config(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::config("Expected unsupported extension error")),
    }
}

#[test]
fn config_fills_values_not_given_on_cli() -> AppResult<()> {
    let config = ConfigFile {
        url: Some("http://from-config/orders".to_owned()),
        requests: Some(200),
        concurrency: Some(20),
        read_timeout: Some(DurationValue::Seconds(9)),
        payment_method: Some("CARD".to_owned()),
        ..ConfigFile::default()
    };

    let (mut args, matches) = args_from(&["orderstorm", "--url", "http://from-cli/orders", "-c", "4"])?;
    apply_config(&mut args, &matches, &config)?;

    if args.url != "http://from-cli/orders" {
        return Err(AppError::config("CLI url should win"));
    }
    if args.concurrency.get() != 4 {
        return Err(AppError::config("CLI concurrency should win"));
    }
    if args.requests.get() != 200 {
        return Err(AppError::config("Config requests should apply"));
    }
    if args.read_timeout != Duration::from_secs(9) {
        return Err(AppError::config("Config read_timeout should apply"));
    }
    if args.payment_method != "CARD" {
        return Err(AppError::config("Config payment_method should apply"));
    }
    Ok(())
}

#[test]
fn zero_requests_in_config_is_rejected() -> AppResult<()> {
    let config = ConfigFile {
        requests: Some(0),
        ..ConfigFile::default()
    };
    let (mut args, matches) = args_from(&["orderstorm"])?;

    match apply_config(&mut args, &matches, &config) {
        Err(AppError::Config(ConfigError::FieldMustBePositive { field, .. })) if field == "requests" => {
            Ok(())
        }
        Err(err) => Err(AppError::config(format!("Unexpected error: {}", err))),
        Ok(()) => Err(AppError::config("Expected zero requests to be rejected")),
    }
}

#[test]
fn zero_duration_in_config_is_rejected() -> AppResult<()> {
    let config = ConfigFile {
        connect_timeout: Some(DurationValue::Seconds(0)),
        ..ConfigFile::default()
    };
    let (mut args, matches) = args_from(&["orderstorm"])?;

    match apply_config(&mut args, &matches, &config) {
        Err(AppError::Config(ConfigError::InvalidDuration { field, .. })) if field == "connect_timeout" => {
            Ok(())
        }
        Err(err) => Err(AppError::config(format!("Unexpected error: {}", err))),
        Ok(()) => Err(AppError::config("Expected zero duration to be rejected")),
    }
}

#[test]
fn login_section_without_credentials_is_rejected() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("orderstorm.toml");
    let content = r#"
[login]
auth_url = "http://localhost:8081/v1/auth"
user_url = "http://localhost:8082/v1/user"
target_product = { productId = 1, sizeId = 2 }
"#;
    std::fs::write(&path, content)?;
    let config = load_config_file(&path)?;
    let (mut args, matches) = args_from(&["orderstorm"])?;

    match apply_config(&mut args, &matches, &config) {
        Err(AppError::Config(ConfigError::LoginCredentialsEmpty)) => Ok(()),
        Err(err) => Err(AppError::config(format!("Unexpected error: {}", err))),
        Ok(()) => Err(AppError::config("Expected missing credentials error")),
    }
}

#[test]
fn login_urls_lose_trailing_slash() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("orderstorm.toml");
    let content = r#"
[login]
auth_url = "http://localhost:8081/v1/auth/"
user_url = "http://localhost:8082/v1/user"
target_product = { productId = 1, sizeId = 2 }

[[login.credentials]]
email = "a@example.com"
password = "pw"
"#;
    std::fs::write(&path, content)?;
    let config = load_config_file(&path)?;
    let (mut args, matches) = args_from(&["orderstorm"])?;
    apply_config(&mut args, &matches, &config)?;

    let login = args
        .login
        .ok_or_else(|| AppError::config("Expected login settings"))?;
    if login.auth_url.as_str() != "http://localhost:8081/v1/auth" {
        return Err(AppError::config(format!(
            "Unexpected auth_url: {}",
            login.auth_url
        )));
    }
    Ok(())
}
