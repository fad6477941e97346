//! JSON report output.

use std::path::Path;

use biosample_model::RecordValidationReport;
use serde::Serialize;

use crate::error::{ReportError, Result};
use crate::summary::ValidatedRecord;

#[derive(Serialize)]
struct JsonRecordReport<'a> {
    id: &'a str,
    accession: &'a str,
    package_name: &'a str,
    is_valid: bool,
    #[serde(flatten)]
    report: &'a RecordValidationReport,
}

/// Render reports as a pretty JSON array.
pub fn render_json_reports(records: &[ValidatedRecord]) -> serde_json::Result<String> {
    let payload: Vec<_> = records
        .iter()
        .map(|validated| JsonRecordReport {
            id: &validated.report.record.id,
            accession: &validated.report.record.accession,
            package_name: &validated.report.record.package_name,
            is_valid: validated.is_valid,
            report: &validated.report,
        })
        .collect();
    serde_json::to_string_pretty(&payload)
}

pub fn write_json_reports(path: &Path, records: &[ValidatedRecord]) -> Result<()> {
    let json = render_json_reports(records).map_err(|e| ReportError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
    }
    std::fs::write(path, format!("{json}\n")).map_err(|e| ReportError::io(path, e))
}
