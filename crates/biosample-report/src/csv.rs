//! CSV report writers.
//!
//! Every cell is quoted and double quotes inside cell text are replaced with
//! single quotes. Files are opened in append mode and carry no header row.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use biosample_model::{
    AttributeGroupValidationReport, AttributeValidationReport, Record, TermValidationReport,
};
use csv::{QuoteStyle, WriterBuilder};
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::summary::ValidatedRecord;

pub const RECORDS_FILE: &str = "biosample-records.csv";
pub const ATTRIBUTES_FILE: &str = "biosample-attributes.csv";

fn clean(cell: &str) -> String {
    cell.replace('"', "'")
}

fn quoted_writer<W: Write>(writer: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .from_writer(writer)
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ReportError::io(path, e))
}

/// Writes one row per record and one row per attribute report.
pub struct CsvReportWriter {
    records_path: PathBuf,
    attributes_path: PathBuf,
    records: csv::Writer<File>,
    attributes: csv::Writer<File>,
    attribute_counter: u64,
}

impl CsvReportWriter {
    /// Open (appending) the two report files under `output_dir`, creating
    /// the directory if needed.
    pub fn create(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir).map_err(|e| ReportError::io(output_dir, e))?;
        let records_path = output_dir.join(RECORDS_FILE);
        let attributes_path = output_dir.join(ATTRIBUTES_FILE);
        let records = quoted_writer(open_append(&records_path)?);
        let attributes = quoted_writer(open_append(&attributes_path)?);
        debug!(dir = %output_dir.display(), "opened CSV report files");
        Ok(Self {
            records_path,
            attributes_path,
            records,
            attributes,
            attribute_counter: 1,
        })
    }

    pub fn records_path(&self) -> &Path {
        &self.records_path
    }

    pub fn attributes_path(&self) -> &Path {
        &self.attributes_path
    }

    pub fn write(&mut self, validated: &ValidatedRecord) -> Result<()> {
        let record = &validated.report.record;
        self.records
            .write_record(record_row(record, validated.is_valid))
            .map_err(|e| ReportError::csv(&self.records_path, &e))?;
        for group in &validated.report.groups {
            self.write_group(group, &record.id)?;
        }
        Ok(())
    }

    fn write_group(&mut self, group: &AttributeGroupValidationReport, record_id: &str) -> Result<()> {
        for report in &group.reports {
            let row = attribute_row(self.attribute_counter, record_id, &group.group_name, report);
            self.attributes
                .write_record(row)
                .map_err(|e| ReportError::csv(&self.attributes_path, &e))?;
            self.attribute_counter += 1;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.records
            .flush()
            .map_err(|e| ReportError::io(&self.records_path, e))?;
        self.attributes
            .flush()
            .map_err(|e| ReportError::io(&self.attributes_path, e))
    }
}

fn record_row(record: &Record, is_valid: bool) -> Vec<String> {
    vec![
        clean(&record.id),
        clean(&record.accession),
        clean(&record.publication_date),
        clean(&record.last_update),
        clean(&record.submission_date),
        clean(&record.access),
        clean(&record.organism_taxonomy_id),
        clean(&record.organism_taxonomy_name),
        clean(&record.organism_name),
        clean(&record.owner_name),
        clean(&record.model_name),
        clean(&record.package_display_name),
        clean(&record.package_name),
        clean(&record.status),
        clean(&record.status_date),
        is_valid.to_string(),
    ]
}

fn attribute_row(
    counter: u64,
    record_id: &str,
    group_name: &str,
    report: &AttributeValidationReport,
) -> Vec<String> {
    let attribute = &report.attribute;
    vec![
        counter.to_string(),
        clean(record_id),
        clean(group_name),
        clean(&attribute.harmonized_name),
        clean(&attribute.submitted_name),
        clean(&attribute.display_name),
        clean(&attribute.value),
        report.is_valid().to_string(),
        report.is_filled_in.to_string(),
        report.is_valid_format.to_string(),
        clean(report.match_value.as_deref().unwrap_or_default()),
    ]
}

/// Rows of `term, resolvable, match value, match label` for batch term checks.
pub struct TermCsvWriter<W: Write> {
    path: PathBuf,
    writer: csv::Writer<W>,
}

impl TermCsvWriter<File> {
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self::from_writer(open_append(path)?, path))
    }
}

impl<W: Write> TermCsvWriter<W> {
    pub fn from_writer(writer: W, path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            writer: quoted_writer(writer),
        }
    }

    pub fn write(&mut self, term: &str, report: &TermValidationReport) -> Result<()> {
        self.writer
            .write_record([
                clean(term),
                report.is_resolvable_ontology_class().to_string(),
                clean(&report.match_value),
                clean(&report.match_label),
            ])
            .map_err(|e| ReportError::csv(&self.path, &e))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| ReportError::io(&self.path, e))
    }

    pub fn into_inner(self) -> Result<W> {
        let path = self.path;
        self.writer
            .into_inner()
            .map_err(|e| ReportError::io(path, e.into_error()))
    }
}

/// Rows of `value, true|false` for batch timestamp checks.
pub struct TimestampCsvWriter<W: Write> {
    path: PathBuf,
    writer: csv::Writer<W>,
}

impl TimestampCsvWriter<File> {
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self::from_writer(open_append(path)?, path))
    }
}

impl<W: Write> TimestampCsvWriter<W> {
    pub fn from_writer(writer: W, path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            writer: quoted_writer(writer),
        }
    }

    pub fn write(&mut self, value: &str, is_valid: bool) -> Result<()> {
        self.writer
            .write_record([clean(value), is_valid.to_string()])
            .map_err(|e| ReportError::csv(&self.path, &e))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| ReportError::io(&self.path, e))
    }

    pub fn into_inner(self) -> Result<W> {
        let path = self.path;
        self.writer
            .into_inner()
            .map_err(|e| ReportError::io(path, e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_rows_are_quoted() {
        let mut writer = TermCsvWriter::from_writer(Vec::new(), Path::new("terms.csv"));
        let report = TermValidationReport {
            match_value: "http://purl.obolibrary.org/obo/UBERON_0002107".to_string(),
            match_label: "liver".to_string(),
            is_from_ontology: true,
            is_owl_class: true,
            iri_resolves: true,
        };
        writer.write("the \"liver\"", &report).expect("write term");
        writer
            .write("nothing", &TermValidationReport::unresolved())
            .expect("write term");
        let bytes = writer.into_inner().expect("into inner");
        assert_eq!(
            String::from_utf8(bytes).expect("utf8"),
            "\"the 'liver'\",\"true\",\"http://purl.obolibrary.org/obo/UBERON_0002107\",\"liver\"\n\
             \"nothing\",\"false\",\"\",\"\"\n"
        );
    }

    #[test]
    fn timestamp_rows() {
        let mut writer = TimestampCsvWriter::from_writer(Vec::new(), Path::new("dates.csv"));
        writer.write("1990-10-30", true).expect("write");
        writer.write("1990/10/30", false).expect("write");
        let bytes = writer.into_inner().expect("into inner");
        assert_eq!(
            String::from_utf8(bytes).expect("utf8"),
            "\"1990-10-30\",\"true\"\n\"1990/10/30\",\"false\"\n"
        );
    }
}
