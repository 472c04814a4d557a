//! Command-line runner for problem declarations.
//!
//! A problem crate implements [`tcf_model::ProblemSpec`] and hands it to
//! [`run`] from its `main`:
//!
//! ```no_run
//! # use tcf_model::{IoFormatBuilder, LineSegment, ProblemSpec, Result, Scalar, Variables};
//! # struct Problem { a: Scalar<i64> }
//! # impl ProblemSpec for Problem {
//! #     fn declare(vars: &mut Variables) -> Result<Self> { Ok(Self { a: vars.scalar("A")? }) }
//! #     fn input_format(&self, format: &mut IoFormatBuilder) { format.input(LineSegment::new().with(self.a)); }
//! # }
//! fn main() {
//!     std::process::exit(tcf_cli::run::<Problem>());
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tcf_model::{ProblemSpec, Spec};
use tracing::error;
use tracing::level_filters::LevelFilter;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, ReportFormatArg};
use crate::commands::{describe_format, describe_variables, run_check_output, run_validate};
use crate::logging::{LogConfig, LogFormat, init_logging};
use crate::summary::{print_format, print_output_check, print_validation};

/// Parse the process arguments, run the command for `P` and return the exit code.
pub fn run<P: ProblemSpec>() -> i32 {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        return 1;
    }
    let spec = match Spec::<P>::build() {
        Ok(spec) => spec,
        Err(error) => {
            error!(%error, "problem declaration rejected");
            eprintln!("error: invalid problem declaration: {error}");
            return 1;
        }
    };
    execute(&spec, &cli.command)
}

/// Run one command against an already built problem.
pub fn execute<P: ProblemSpec>(spec: &Spec<P>, command: &Command) -> i32 {
    match command {
        Command::Validate(args) => {
            let run = run_validate(spec, args);
            match args.report {
                ReportFormatArg::Table => print_validation(&run),
                ReportFormatArg::Json => match serde_json::to_string_pretty(&run) {
                    Ok(json) => println!("{json}"),
                    Err(error) => {
                        eprintln!("error: {error}");
                        return 1;
                    }
                },
            }
            i32::from(run.has_errors)
        }
        Command::CheckOutput(args) => match run_check_output(spec, args) {
            Ok(check) => {
                print_output_check(&check);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Format => {
            print_format(
                &describe_format(spec),
                &describe_variables(spec.variables()),
                spec.multiple_test_cases(),
            );
            0
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_log_level_wins() {
        let cli = Cli::parse_from(["tcf", "--log-level", "debug", "-q", "format"]);
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn test_defaults_defer_to_rust_log() {
        let cli = Cli::parse_from(["tcf", "--color", "never", "format"]);
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert!(!config.with_ansi);
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_subtasks_are_comma_separated() {
        let cli = Cli::parse_from(["tcf", "validate", "a.in", "b.in", "--subtasks", "1,3"]);
        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.subtasks, vec![1, 3]);
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.report, ReportFormatArg::Table);
    }
}
