use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tcf_io::{IoCodec, MultipleTestCasesCodec};
use tcf_model::{IoSegment, ProblemSpec, Size, Spec, VariableDecl, Variables};
use tcf_verify::{VerificationResult, Verifier};
use tracing::{info, info_span, warn};

use crate::cli::{CheckOutputArgs, ValidateArgs};
use crate::types::{CaseReport, FileReport, FormatRow, OutputCheck, ValidationRun};

pub fn run_validate<P: ProblemSpec>(spec: &Spec<P>, args: &ValidateArgs) -> ValidationRun {
    let declared: BTreeSet<i32> = args.subtasks.iter().copied().collect();
    let span = info_span!("validate", problem = spec.problem().slug());
    let _guard = span.enter();
    let files = args
        .files
        .iter()
        .map(|path| match read_text(path) {
            Ok(text) => validate_text(spec, path.clone(), &text, &declared),
            Err(error) => {
                warn!(path = %path.display(), "skipping unreadable file");
                FileReport::failed(path.clone(), format!("{error:#}"))
            }
        })
        .collect();
    ValidationRun::new(declared.into_iter().collect(), files)
}

/// Parse `text` as one input file and verify every case it holds.
pub fn validate_text<P: ProblemSpec>(
    spec: &Spec<P>,
    path: PathBuf,
    text: &str,
    declared: &BTreeSet<i32>,
) -> FileReport {
    let parsed = match spec.multiple_test_cases() {
        Some(config) => {
            MultipleTestCasesCodec::new(spec.format(), spec.variables(), config).parse_input(text)
        }
        None => {
            let mut data = spec.variables().instantiate();
            IoCodec::new(spec.format())
                .parse_input(&mut data, text)
                .map(|()| vec![data])
        }
    };
    let cases = match parsed {
        Ok(cases) => cases,
        Err(error) => {
            warn!(path = %path.display(), %error, "input does not match the format");
            return FileReport::failed(path, error.to_string());
        }
    };

    let verifier = Verifier::new(spec.suite());
    let count_result = if spec.multiple_test_cases().is_some() {
        verifier.verify_multiple_test_cases(cases.len())
    } else {
        VerificationResult::new()
    };
    let cases: Vec<CaseReport> = cases
        .iter()
        .zip(1..)
        .map(|(data, index)| CaseReport {
            index,
            result: verifier.verify_test_case(data, declared),
        })
        .collect();

    let report = FileReport {
        path,
        error: None,
        count_result,
        cases,
    };
    info!(
        path = %report.path.display(),
        cases = report.cases.len(),
        failures = report.failure_count(),
        "validated file"
    );
    report
}

pub fn run_check_output<P: ProblemSpec>(
    spec: &Spec<P>,
    args: &CheckOutputArgs,
) -> Result<OutputCheck> {
    let output = read_text(&args.file)?;
    let input = args.input.as_deref().map(read_text).transpose()?;
    check_output_text(spec, args.file.clone(), &output, input.as_deref())
}

/// Parse `output` against the output variants, after `input` when given.
pub fn check_output_text<P: ProblemSpec>(
    spec: &Spec<P>,
    path: PathBuf,
    output: &str,
    input: Option<&str>,
) -> Result<OutputCheck> {
    if let Some(config) = spec.multiple_test_cases() {
        let codec = MultipleTestCasesCodec::new(spec.format(), spec.variables(), config);
        let input = input
            .ok_or_else(|| anyhow!("--input is required for problems with multiple test cases"))?;
        let mut cases = codec.parse_input(input).context("parse input")?;
        codec.parse_output(&mut cases, output).context("parse output")?;
        return Ok(OutputCheck {
            path,
            cases: cases.len(),
            variant: None,
        });
    }

    let codec = IoCodec::new(spec.format());
    let mut data = spec.variables().instantiate();
    if let Some(input) = input {
        codec.parse_input(&mut data, input).context("parse input")?;
    }
    let variant = codec.parse_output(&mut data, output).context("parse output")?;
    Ok(OutputCheck {
        path,
        cases: 1,
        variant,
    })
}

/// One row per segment: the input first, then each output variant.
pub fn describe_format<P>(spec: &Spec<P>) -> Vec<FormatRow> {
    let variables = spec.variables();
    let format = spec.format();
    let mut rows: Vec<FormatRow> = format
        .input()
        .iter()
        .map(|segment| format_row("input", segment, variables))
        .collect();
    for (index, variant) in format.outputs().iter().enumerate() {
        let section = format!("output #{}", index + 1);
        rows.extend(
            variant
                .iter()
                .map(|segment| format_row(&section, segment, variables)),
        );
    }
    rows
}

fn format_row(section: &str, segment: &IoSegment, variables: &Variables) -> FormatRow {
    let names = segment
        .variables()
        .into_iter()
        .map(|id| {
            variables
                .get(id)
                .map_or_else(|| format!("#{}", id.index()), |decl| decl.name().to_owned())
        })
        .collect();
    let size = match segment {
        IoSegment::Line(_) | IoSegment::RawLine(_) => "1 line".to_owned(),
        IoSegment::Lines(lines) => line_count(lines.size()),
        IoSegment::RawLines(lines) => line_count(lines.size()),
        IoSegment::Grid(grid) => {
            format!("{} x {}", size_label(grid.rows()), size_label(grid.columns()))
        }
    };
    FormatRow {
        section: section.to_owned(),
        kind: segment.kind(),
        variables: names,
        size,
    }
}

fn line_count(size: Option<&Size>) -> String {
    match size {
        Some(size) => format!("{} lines", size_label(size)),
        None => "until EOF".to_owned(),
    }
}

fn size_label(size: &Size) -> String {
    size.fixed()
        .map_or_else(|| "dynamic".to_owned(), |fixed| fixed.to_string())
}

/// Declared variables as `NAME: kind<type>` lines.
pub fn describe_variables(variables: &Variables) -> Vec<String> {
    variables.iter().map(variable_label).collect()
}

fn variable_label(decl: &VariableDecl) -> String {
    let raw = if decl.is_raw() { "raw " } else { "" };
    format!(
        "{}: {raw}{}<{}>",
        decl.name(),
        decl.kind(),
        decl.element_type()
    )
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
