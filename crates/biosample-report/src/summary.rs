//! Run-level counts computed from validation reports.

use std::collections::BTreeMap;

use biosample_model::RecordValidationReport;
use serde::{Deserialize, Serialize};

/// A record report together with the verdict of the validator that built it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedRecord {
    pub report: RecordValidationReport,
    pub is_valid: bool,
}

impl ValidatedRecord {
    pub fn new(report: RecordValidationReport, is_valid: bool) -> Self {
        Self { report, is_valid }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub attributes: usize,
    pub filled_in: usize,
    pub invalid: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub records: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    /// Records the validator refused, e.g. because of their package.
    pub skipped_records: usize,
    pub groups: BTreeMap<String, GroupSummary>,
}

impl RunSummary {
    pub fn from_reports(records: &[ValidatedRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.add(record);
        }
        summary
    }

    pub fn add(&mut self, record: &ValidatedRecord) {
        self.records += 1;
        if record.is_valid {
            self.valid_records += 1;
        } else {
            self.invalid_records += 1;
        }
        for group in &record.report.groups {
            let entry = self.groups.entry(group.group_name.clone()).or_default();
            entry.attributes += group.reports.len();
            entry.filled_in += group.filled_in_count();
            entry.invalid += group.invalid_count();
        }
    }

    pub fn record_skipped(&mut self) {
        self.skipped_records += 1;
    }

    pub fn has_invalid_records(&self) -> bool {
        self.invalid_records > 0
    }

    pub fn filled_in_attributes(&self) -> usize {
        self.groups.values().map(|g| g.filled_in).sum()
    }

    pub fn invalid_attributes(&self) -> usize {
        self.groups.values().map(|g| g.invalid).sum()
    }
}
