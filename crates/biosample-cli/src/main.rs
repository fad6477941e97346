//! BioSample Analyzer CLI.

use biosample_cli::logging::{LogConfig, LogFormat, init_logging};
use biosample_cli::summary::{record_counts_line, summary_table};
use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_attributes, run_terms, run_timestamps, run_validate};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Validate(args) => match run_validate(&cli, args) {
            Ok(outcome) => {
                let summary = &outcome.run.summary;
                println!("Input: {}", args.input.display());
                println!("Records CSV: {}", outcome.outputs.records_csv.display());
                println!("Attributes CSV: {}", outcome.outputs.attributes_csv.display());
                if let Some(path) = &outcome.outputs.json {
                    println!("JSON report: {}", path.display());
                }
                println!("{}", record_counts_line(summary));
                println!("{}", summary_table(summary));
                i32::from(summary.has_invalid_records())
            }
            Err(error) => report_error(&error),
        },
        Command::Terms(args) => match run_terms(&cli, args) {
            Ok((counts, output)) => {
                println!(
                    "Terms: {} checked, {} resolvable, {} unresolved",
                    counts.checked,
                    counts.matched,
                    counts.unmatched()
                );
                println!("Report: {}", output.display());
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Timestamps(args) => match run_timestamps(args) {
            Ok((counts, output)) => {
                println!(
                    "Timestamps: {} checked, {} valid, {} invalid",
                    counts.checked,
                    counts.matched,
                    counts.unmatched()
                );
                println!("Report: {}", output.display());
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Attributes(args) => match run_attributes(&cli, args) {
            Ok(()) => 0,
            Err(error) => report_error(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default()
        .with_level_filter(cli.verbosity.tracing_level_filter())
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data);
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config = config.with_format(match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    });
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
