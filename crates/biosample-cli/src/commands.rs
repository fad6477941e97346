use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use biosample_cli::pipeline::{
    BatchCounts, OutputPaths, ValidationRun, bioportal_resolver, check_timestamps, load_registry,
    load_vocabulary, progress_bar, read_values, resolve_standards_dir, resolve_terms,
    validate_records, write_outputs,
};
use biosample_cli::summary::attribute_table;
use biosample_ingest::parse_biosample_file;
use biosample_model::AttributeType;
use biosample_validate::{AttributeValidator, MetagenomePackageValidator, RecordValidator};

use crate::cli::{AttributesArgs, Cli, PackageArg, TermsArgs, TimestampsArgs, ValidateArgs};

/// Result of the `validate` command.
pub struct ValidateOutcome {
    pub run: ValidationRun,
    pub outputs: OutputPaths,
}

pub fn run_validate(cli: &Cli, args: &ValidateArgs) -> Result<ValidateOutcome> {
    let span = info_span!("validate", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();
    let standards_dir = resolve_standards_dir(cli.standards_dir.as_deref());

    let records = parse_biosample_file(&args.input)
        .with_context(|| format!("parse {}", args.input.display()))?;
    let vocabulary = load_vocabulary(&standards_dir)?;
    let validator: Box<dyn RecordValidator> = match args.package {
        Some(PackageArg::Metagenome) => Box::new(MetagenomePackageValidator::new(vocabulary)),
        None => {
            let registry = load_registry(&standards_dir)?;
            let resolver = bioportal_resolver(cli.api_key.as_deref(), &cli.bioportal_url)?;
            Box::new(AttributeValidator::new(registry, vocabulary, resolver))
        }
    };

    let progress = progress_bar(records.len(), !args.no_progress);
    let run = validate_records(&records, validator.as_ref(), &progress);

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.input));
    let outputs = write_outputs(&run, &output_dir, args.json.as_deref())?;
    info!(
        output_dir = %output_dir.display(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "wrote validation reports"
    );
    Ok(ValidateOutcome { run, outputs })
}

pub fn run_terms(cli: &Cli, args: &TermsArgs) -> Result<(BatchCounts, PathBuf)> {
    let terms = read_values(&args.input)?;
    let resolver = bioportal_resolver(cli.api_key.as_deref(), &cli.bioportal_url)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| sibling_path(&args.input, "terms.csv"));
    let progress = progress_bar(terms.len(), !args.no_progress);
    let counts = resolve_terms(&terms, &resolver, !args.fuzzy, &output, &progress)?;
    info!(
        checked = counts.checked,
        resolvable = counts.matched,
        "resolved terms"
    );
    Ok((counts, output))
}

pub fn run_timestamps(args: &TimestampsArgs) -> Result<(BatchCounts, PathBuf)> {
    let values = read_values(&args.input)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| sibling_path(&args.input, "timestamps.csv"));
    let counts = check_timestamps(&values, &output)?;
    info!(checked = counts.checked, valid = counts.matched, "checked timestamps");
    Ok((counts, output))
}

pub fn run_attributes(cli: &Cli, args: &AttributesArgs) -> Result<()> {
    let attribute_type = args
        .attribute_type
        .as_deref()
        .map(str::parse::<AttributeType>)
        .transpose()
        .context("parse --type")?;
    let registry = load_registry(&resolve_standards_dir(cli.standards_dir.as_deref()))?;
    println!("{}", attribute_table(&registry, attribute_type));
    Ok(())
}

fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("output")
}

/// `<input>.<suffix>` next to the input file.
fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    input.with_file_name(name)
}
