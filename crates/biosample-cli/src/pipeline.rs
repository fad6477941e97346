//! Validation pipeline stages shared by the CLI commands.

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, info_span, warn};

use biosample_model::Record;
use biosample_ontology::{BioPortalClient, OntologyClientConfig, OntologySearch, TermResolver};
use biosample_report::{
    CsvReportWriter, RunSummary, TermCsvWriter, TimestampCsvWriter, ValidatedRecord,
    write_json_reports,
};
use biosample_standards::paths::{ATTRIBUTES_FILE, COUNTRY_LIST_FILE};
use biosample_standards::{LocationVocabulary, SchemaRegistry, standards_root};
use biosample_validate::RecordValidator;
use biosample_validate::rules::is_timestamp;

use crate::logging::redact_value;

/// Standards directory, honoring an explicit override before the environment.
pub fn resolve_standards_dir(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(standards_root, Path::to_path_buf)
}

pub fn load_registry(standards_dir: &Path) -> Result<SchemaRegistry> {
    let path = standards_dir.join(ATTRIBUTES_FILE);
    let registry = SchemaRegistry::from_csv_path(&path)
        .with_context(|| format!("load attribute definitions from {}", path.display()))?;
    info!(schemas = registry.len(), "loaded attribute schema registry");
    Ok(registry)
}

pub fn load_vocabulary(standards_dir: &Path) -> Result<LocationVocabulary> {
    let path = standards_dir.join(COUNTRY_LIST_FILE);
    let vocabulary = LocationVocabulary::from_path(&path)
        .with_context(|| format!("load location vocabulary from {}", path.display()))?;
    info!(locations = vocabulary.len(), "loaded location vocabulary");
    Ok(vocabulary)
}

/// Build a term resolver backed by BioPortal.
pub fn bioportal_resolver(api_key: Option<&str>, base_url: &str) -> Result<TermResolver> {
    let Some(api_key) = api_key.filter(|key| !key.trim().is_empty()) else {
        bail!("a BioPortal API key is required (use --api-key or BIOPORTAL_API_KEY)");
    };
    let config = OntologyClientConfig::new(api_key).with_base_url(base_url);
    let client = BioPortalClient::new(&config).context("create BioPortal client")?;
    Ok(TermResolver::from_shared(Arc::new(client) as Arc<dyn OntologySearch>))
}

/// Progress bar over `len` items; hidden when disabled or stderr is not a terminal.
pub fn progress_bar(len: usize, enabled: bool) -> ProgressBar {
    if !enabled || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
    {
        bar.set_style(style);
    }
    bar
}

/// Validated records plus their run-level counts.
#[derive(Debug, Default)]
pub struct ValidationRun {
    pub records: Vec<ValidatedRecord>,
    pub summary: RunSummary,
}

/// Validate every record in order. Records the validator refuses are logged
/// and counted as skipped.
pub fn validate_records(
    records: &[Record],
    validator: &dyn RecordValidator,
    progress: &ProgressBar,
) -> ValidationRun {
    let mut run = ValidationRun::default();
    for record in records {
        let span = info_span!("record", id = %record.id);
        let _guard = span.enter();
        match validator.validate(record) {
            Ok(report) => {
                let is_valid = validator.is_valid(&report);
                debug!(is_valid, "validated record");
                let validated = ValidatedRecord::new(report, is_valid);
                run.summary.add(&validated);
                run.records.push(validated);
            }
            Err(error) => {
                warn!(%error, "skipping record");
                run.summary.record_skipped();
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();
    info!(
        records = run.summary.records,
        valid = run.summary.valid_records,
        invalid = run.summary.invalid_records,
        skipped = run.summary.skipped_records,
        "validation finished"
    );
    run
}

/// Files written for a validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub records_csv: PathBuf,
    pub attributes_csv: PathBuf,
    pub json: Option<PathBuf>,
}

pub fn write_outputs(
    run: &ValidationRun,
    output_dir: &Path,
    json_path: Option<&Path>,
) -> Result<OutputPaths> {
    let mut writer = CsvReportWriter::create(output_dir).context("open CSV reports")?;
    for validated in &run.records {
        writer.write(validated).context("write CSV report rows")?;
    }
    writer.flush().context("flush CSV reports")?;
    if let Some(path) = json_path {
        write_json_reports(path, &run.records).context("write JSON report")?;
    }
    Ok(OutputPaths {
        records_csv: writer.records_path().to_path_buf(),
        attributes_csv: writer.attributes_path().to_path_buf(),
        json: json_path.map(Path::to_path_buf),
    })
}

/// Trimmed, non-empty lines of a text file.
pub fn read_values(path: &Path) -> Result<Vec<String>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Outcome counts for a batch check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchCounts {
    pub checked: usize,
    pub matched: usize,
}

impl BatchCounts {
    pub fn unmatched(&self) -> usize {
        self.checked - self.matched
    }
}

/// Resolve each term and append one row per term to `output`.
pub fn resolve_terms(
    terms: &[String],
    resolver: &TermResolver,
    exact_match: bool,
    output: &Path,
    progress: &ProgressBar,
) -> Result<BatchCounts> {
    let mut writer = TermCsvWriter::create(output).context("open term report")?;
    let mut counts = BatchCounts::default();
    for term in terms {
        let report = resolver.resolve(term, exact_match, &[]);
        let matched = report.is_resolvable_ontology_class();
        debug!(term = %redact_value(term), matched, "resolved term");
        writer.write(term, &report).context("write term row")?;
        counts.checked += 1;
        if matched {
            counts.matched += 1;
        }
        progress.inc(1);
    }
    progress.finish_and_clear();
    writer.flush().context("flush term report")?;
    Ok(counts)
}

/// Check each value with the timestamp rule and append one row per value to `output`.
pub fn check_timestamps(values: &[String], output: &Path) -> Result<BatchCounts> {
    let mut writer = TimestampCsvWriter::create(output).context("open timestamp report")?;
    let mut counts = BatchCounts::default();
    for value in values {
        let valid = is_timestamp(value);
        debug!(value = %redact_value(value), valid, "checked timestamp");
        writer.write(value, valid).context("write timestamp row")?;
        counts.checked += 1;
        if valid {
            counts.matched += 1;
        }
    }
    writer.flush().context("flush timestamp report")?;
    Ok(counts)
}
