use biosample_model::{Record, RecordValidationReport};

use crate::error::ValidationError;

/// Validates whole records.
pub trait RecordValidator: Send + Sync {
    fn validate(&self, record: &Record) -> Result<RecordValidationReport, ValidationError>;

    /// Record-level verdict. Defaults to every attribute report being valid.
    fn is_valid(&self, report: &RecordValidationReport) -> bool {
        is_valid(report)
    }
}

/// True when every attribute report in every group is valid.
pub fn is_valid(report: &RecordValidationReport) -> bool {
    report
        .attribute_reports()
        .all(biosample_model::AttributeValidationReport::is_valid)
}
