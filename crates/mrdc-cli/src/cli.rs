//! CLI argument definitions for the `mrdc` pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use mrdc_cli::config::DEFAULT_CONFIG_FILE;
use mrdc_model::TableKind;

#[derive(Parser)]
#[command(
    name = "mrdc",
    version,
    about = "Multinational Retail Data Centre - extract, clean and load sales data",
    long_about = "Extract retail sales data from a database, a PDF, object storage and a store API,\n\
                  clean each table and load it into the analytics warehouse."
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

    /// Include row values (names, phone and card numbers) in debug logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract, clean and load the configured tables.
    Run(RunArgs),

    /// Clean a local CSV or JSON extract without touching any service.
    Clean(CleanArgs),

    /// List the tables with their sources and destinations.
    Tables(TablesArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Pipeline configuration file.
    #[arg(long = "config", value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Only process these tables (repeatable; default from config, else all).
    #[arg(long = "table", value_name = "TABLE", value_parser = parse_table_kind)]
    pub tables: Vec<TableKind>,

    /// Write cleaned tables as CSV files into this directory instead of the warehouse.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Stop cleaning a table at its first failed step.
    #[arg(long = "abort-on-error")]
    pub abort_on_error: bool,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Table cleaner to apply.
    #[arg(long = "table", value_name = "TABLE", value_parser = parse_table_kind)]
    pub table: TableKind,

    /// Raw extract (`.csv` or `.json`).
    #[arg(long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Where to write the cleaned CSV.
    #[arg(long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// Stop at the first failed step.
    #[arg(long = "abort-on-error")]
    pub abort_on_error: bool,
}

#[derive(Parser)]
pub struct TablesArgs {
    /// Pipeline configuration file (needed with --database).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also list the tables present in the source database.
    #[arg(long = "database", requires = "config")]
    pub database: bool,
}

fn parse_table_kind(value: &str) -> Result<TableKind, String> {
    value.parse::<TableKind>().map_err(|error| error.to_string())
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
