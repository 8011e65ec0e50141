
use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use support_single::{
    ORDER_CREATED, OUT_OF_STOCK, run_orderstorm, run_orderstorm_with_env,
    spawn_http_server_or_skip,
};

const USERS_JSON: &str = r#"[
  {"email": "a@example.com", "userId": "u-1", "addressId": 1, "token": "tok-a",
   "targetProduct": {"productId": 10, "sizeId": 20, "name": "Shirt"}},
  {"email": "b@example.com", "userId": "u-2", "addressId": 2, "token": "tok-b",
   "targetProduct": {"productId": 10, "sizeId": 20, "name": "Shirt"}}
]"#;

fn prep_users() -> Result<(tempfile::TempDir, PathBuf), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let users = dir.path().join("user_data.json");
    fs::write(&users, USERS_JSON).map_err(|err| format!("write users failed: {}", err))?;
    Ok((dir, users))
}

fn read_report(path: &PathBuf) -> Result<serde_json::Value, String> {
    let content = fs::read_to_string(path).map_err(|err| format!("read report failed: {}", err))?;
    serde_json::from_str(&content).map_err(|err| format!("parse report failed: {}", err))
}

#[test]
fn e2e_single_cli_basic() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip(ORDER_CREATED)? else {
        return Ok(());
    };
    let (dir, users) = prep_users()?;
    let report_path = dir.path().join("report.json");

    let args = vec![
        "-u".to_owned(),
        format!("{}/v1/order/create-from-cart", url),
        "-n".to_owned(),
        "40".to_owned(),
        "-c".to_owned(),
        "4".to_owned(),
        "--users-file".to_owned(),
        users.to_string_lossy().into_owned(),
        "--output".to_owned(),
        report_path.to_string_lossy().into_owned(),
        "--no-color".to_owned(),
    ];

    let output = run_orderstorm(args)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            stdout,
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    if !stdout.contains("Total Requests: 40") {
        return Err(format!("Unexpected summary: {}", stdout));
    }

    let report = read_report(&report_path)?;
    if report.get("success").and_then(serde_json::Value::as_u64) != Some(40) {
        return Err(format!("Unexpected report: {}", report));
    }
    Ok(())
}

#[test]
fn e2e_single_reservation_failures_do_not_fail_run() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip(OUT_OF_STOCK)? else {
        return Ok(());
    };
    let (dir, users) = prep_users()?;
    let report_path = dir.path().join("report.json");

    let args = vec![
        "-u".to_owned(),
        url,
        "-n".to_owned(),
        "10".to_owned(),
        "-c".to_owned(),
        "3".to_owned(),
        "-f".to_owned(),
        users.to_string_lossy().into_owned(),
        "-o".to_owned(),
        report_path.to_string_lossy().into_owned(),
    ];

    let output = run_orderstorm(args)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            stdout,
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    if !stdout.contains("NOTE: 9 reservation failures detected.") {
        return Err(format!("Missing reservation note: {}", stdout));
    }

    let report = read_report(&report_path)?;
    let failures = report
        .get("failures")
        .and_then(|value| value.get("reservation_failed"))
        .and_then(serde_json::Value::as_u64);
    if failures != Some(9) {
        return Err(format!("Unexpected report: {}", report));
    }
    let dropped = report
        .get("plan")
        .and_then(|value| value.get("dropped_requests"))
        .and_then(serde_json::Value::as_u64);
    if dropped != Some(1) {
        return Err(format!("Expected one dropped request: {}", report));
    }
    Ok(())
}

#[test]
fn e2e_single_missing_users_file_fails() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let missing = dir.path().join("absent.json").to_string_lossy().into_owned();

    let output = run_orderstorm([
        "-u",
        "http://127.0.0.1:9/orders",
        "-n",
        "2",
        "-c",
        "1",
        "--users-file",
        missing.as_str(),
    ])?;
    if output.status.success() {
        return Err("Expected a non-zero exit for a missing users file".to_owned());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("UsersFileMissing") {
        return Err(format!("Expected a diagnostic, got: {}", stderr));
    }
    Ok(())
}

#[test]
fn e2e_single_rejects_concurrency_above_requests() -> Result<(), String> {
    let (_dir, users) = prep_users()?;
    let users = users.to_string_lossy().into_owned();
    let output = run_orderstorm([
        "-n",
        "2",
        "-c",
        "5",
        "--users-file",
        users.as_str(),
    ])?;
    if output.status.success() {
        return Err("Expected failure when concurrency exceeds requests".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_single_reads_timeouts_from_env() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip(ORDER_CREATED)? else {
        return Ok(());
    };
    let (_dir, users) = prep_users()?;
    let args = vec![
        "-u".to_owned(),
        format!("{}/v1/order/create-from-cart", url),
        "-n".to_owned(),
        "2".to_owned(),
        "-c".to_owned(),
        "1".to_owned(),
        "--users-file".to_owned(),
        users.to_string_lossy().into_owned(),
    ];

    for (var, flag) in [
        ("ORDERSTORM_CONNECT_TIMEOUT", "--connect-timeout"),
        ("ORDERSTORM_READ_TIMEOUT", "--read-timeout"),
    ] {
        let output = run_orderstorm_with_env(args.clone(), &[(var, "0s")])?;
        if output.status.success() {
            return Err(format!("{}=0s should be rejected", var));
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.contains(flag) {
            return Err(format!("Expected {} in diagnostic, got: {}", flag, stderr));
        }
    }

    let output = run_orderstorm_with_env(args, &[("ORDERSTORM_READ_TIMEOUT", "2s")])?;
    if !output.status.success() {
        return Err(format!(
            "Valid env timeout failed: {}",
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    Ok(())
}
