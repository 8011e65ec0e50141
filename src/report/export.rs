use std::path::Path;

use crate::error::{AppError, AppResult, MetricsError};

use super::Report;

/// Writes the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error when serialization fails or the file cannot be written.
pub async fn write_report_json(path: &Path, report: &Report) -> AppResult<()> {
    let mut payload = serde_json::to_vec_pretty(report)
        .map_err(|err| AppError::metrics(MetricsError::SerializeReport { source: err }))?;
    payload.push(b'\n');
    tokio::fs::write(path, payload).await.map_err(|err| {
        AppError::metrics(MetricsError::WriteReport {
            path: path.to_path_buf(),
            source: err,
        })
    })
}
