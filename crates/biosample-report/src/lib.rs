//! Serialization of BioSample validation results.
//!
//! - **CSV**: record and attribute rows ([`CsvReportWriter`]), batch term and
//!   timestamp checks
//! - **JSON**: full reports with a per-record verdict
//! - **Summary**: run-level counts ([`RunSummary`])

pub mod csv;
pub mod error;
pub mod json;
pub mod summary;

pub use crate::csv::{
    ATTRIBUTES_FILE, CsvReportWriter, RECORDS_FILE, TermCsvWriter, TimestampCsvWriter,
};
pub use error::{ReportError, Result};
pub use json::{render_json_reports, write_json_reports};
pub use summary::{GroupSummary, RunSummary, ValidatedRecord};
