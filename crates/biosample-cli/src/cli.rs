//! CLI argument definitions for the BioSample analyzer.

use std::path::PathBuf;

use biosample_ontology::{API_KEY_ENV_VAR, DEFAULT_BASE_URL};
use biosample_standards::STANDARDS_ENV_VAR;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "biosample",
    version,
    about = "BioSample Analyzer - Validate NCBI BioSample metadata",
    long_about = "Validate NCBI BioSample records against the harmonized attribute definitions.\n\n\
                  Checks integers, booleans, value sets, timestamps, geographic locations,\n\
                  coordinates and ontology terms (via BioPortal), and writes CSV/JSON reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow submitted attribute values to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Directory holding attributes.csv and country-list.txt.
    #[arg(long = "standards-dir", value_name = "DIR", env = STANDARDS_ENV_VAR, global = true)]
    pub standards_dir: Option<PathBuf>,

    /// BioPortal API key used for ontology term lookups.
    #[arg(
        long = "api-key",
        value_name = "KEY",
        env = API_KEY_ENV_VAR,
        hide_env_values = true,
        global = true
    )]
    pub api_key: Option<String>,

    /// BioPortal REST endpoint.
    #[arg(
        long = "bioportal-url",
        value_name = "URL",
        default_value = DEFAULT_BASE_URL,
        global = true
    )]
    pub bioportal_url: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate every record of a BioSampleSet XML file.
    Validate(ValidateArgs),

    /// Resolve free-text terms (one per line) against BioPortal.
    Terms(TermsArgs),

    /// Check values (one per line) with the timestamp rule.
    Timestamps(TimestampsArgs),

    /// List the harmonized attribute definitions.
    Attributes(AttributesArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// BioSampleSet XML document.
    #[arg(value_name = "INPUT_XML")]
    pub input: PathBuf,

    /// Output directory for the CSV reports (default: `output/` next to the input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Validate against one sample package instead of every harmonized attribute.
    #[arg(long = "package", value_enum)]
    pub package: Option<PackageArg>,

    /// Also write the full reports as JSON.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Disable the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Parser)]
pub struct TermsArgs {
    /// Text file with one term per line.
    #[arg(value_name = "TERMS_FILE")]
    pub input: PathBuf,

    /// Term report CSV (default: `<TERMS_FILE>.terms.csv`).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Accept non-exact label matches.
    #[arg(long = "fuzzy")]
    pub fuzzy: bool,

    /// Disable the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Parser)]
pub struct TimestampsArgs {
    /// Text file with one value per line.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Timestamp report CSV (default: `<FILE>.timestamps.csv`).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct AttributesArgs {
    /// Only list attributes of this type (e.g. VALUE_SET).
    #[arg(long = "type", value_name = "TYPE")]
    pub attribute_type: Option<String>,
}

/// Sample packages with a dedicated validator.
#[derive(Clone, Copy, ValueEnum)]
pub enum PackageArg {
    /// Metagenome.environmental.1.0
    Metagenome,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
