//! CLI argument definitions for problem runners.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    version,
    about = "Validate test-case files against a problem's format and constraints",
    long_about = "Validate test-case files against a problem's format and constraints.\n\n\
                  Input files are parsed with the problem's input format, then every\n\
                  constraint and subtask is checked. Output files are parsed against the\n\
                  declared output variants."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse input files and verify constraints and subtask assignments.
    Validate(ValidateArgs),

    /// Parse an expected-output file against the declared output variants.
    CheckOutput(CheckOutputArgs),

    /// Print the input and output layouts of the problem.
    Format,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Input files to validate.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Subtasks every file is assigned to (comma separated, e.g. 1,3).
    ///
    /// Ignored for problems without subtasks.
    #[arg(long = "subtasks", value_name = "IDS", value_delimiter = ',')]
    pub subtasks: Vec<i32>,

    /// Report format written to stdout.
    #[arg(long = "report", value_enum, default_value = "table")]
    pub report: ReportFormatArg,
}

#[derive(Parser)]
pub struct CheckOutputArgs {
    /// Expected-output file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Matching input file.
    ///
    /// Needed when output sizes depend on input values, and always for problems
    /// with multiple test cases per file.
    #[arg(long = "input", value_name = "INPUT")]
    pub input: Option<PathBuf>,
}

/// Report format choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
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
