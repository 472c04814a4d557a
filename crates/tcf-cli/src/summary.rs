use std::fmt::Write as _;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use tcf_model::MultipleTestCasesConfig;

use crate::types::{FileReport, FormatRow, OutputCheck, ValidationRun};

pub fn print_validation(run: &ValidationRun) {
    println!("{}", validation_table(run));
    let failures = render_failures(run);
    if !failures.is_empty() {
        println!();
        println!("Failures:");
        print!("{failures}");
    }
}

/// OK/FAILED row per file plus a TOTAL row.
pub fn validation_table(run: &ValidationRun) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Cases"),
        header_cell("Status"),
        header_cell("Failures"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    let mut total_cases = 0usize;
    let mut total_failures = 0usize;
    for file in &run.files {
        total_cases += file.cases.len();
        total_failures += file.failure_count();
        table.add_row(vec![
            Cell::new(file.path.display()),
            cases_cell(file),
            status_cell(file.is_ok()),
            count_cell(file.failure_count()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_cases).add_attribute(Attribute::Bold),
        Cell::new(format!("{} failed", run.failed_count()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(total_failures).add_attribute(Attribute::Bold),
    ]);
    table
}

/// The ordered failure list, grouped by file and case.
///
/// Failure lines keep their own indentation under a two-space group indent.
pub fn render_failures(run: &ValidationRun) -> String {
    let mut out = String::new();
    for file in run.files.iter().filter(|file| !file.is_ok()) {
        let _ = writeln!(out, "{}", file.path.display());
        if let Some(error) = &file.error {
            let _ = writeln!(out, "  {error}");
        }
        for failure in file.count_result.failures() {
            let _ = writeln!(out, "  {failure}");
        }
        let numbered = file.cases.len() > 1;
        for case in file.cases.iter().filter(|case| !case.result.is_ok()) {
            let indent = if numbered {
                let _ = writeln!(out, "  case {}:", case.index);
                "    "
            } else {
                "  "
            };
            for failure in case.result.failures() {
                let _ = writeln!(out, "{indent}{failure}");
            }
        }
    }
    out
}

pub fn print_output_check(check: &OutputCheck) {
    match check.variant {
        Some(variant) => println!(
            "{}: OK (output variant #{}, {} case(s))",
            check.path.display(),
            variant + 1,
            check.cases
        ),
        None => println!("{}: OK ({} case(s))", check.path.display(), check.cases),
    }
}

pub fn print_format(
    rows: &[FormatRow],
    variables: &[String],
    multiple_test_cases: Option<&MultipleTestCasesConfig>,
) {
    println!("Variables:");
    for variable in variables {
        println!("  {variable}");
    }
    println!("{}", format_table(rows));
    if let Some(config) = multiple_test_cases {
        println!("{}", describe_multiple_test_cases(config));
    }
}

pub fn format_table(rows: &[FormatRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Segment"),
        header_cell("Variables"),
        header_cell("Size"),
    ]);
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.section),
            Cell::new(row.kind),
            Cell::new(row.variables.join(" ")),
            Cell::new(&row.size),
        ]);
    }
    table
}

/// One-paragraph description of a multiple-test-cases layout.
pub fn describe_multiple_test_cases(config: &MultipleTestCasesConfig) -> String {
    let mut text = String::from("Multiple test cases: case count T on the first input line");
    if config.empty_line_before_inputs {
        text.push_str(", empty line before each input");
    }
    if let Some(prefix) = &config.output_prefix {
        let _ = write!(text, ", outputs prefixed with '{prefix}'");
    }
    if config.empty_line_between_outputs {
        text.push_str(", empty line between outputs");
    }
    text
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(ok: bool) -> Cell {
    if ok {
        Cell::new("OK")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn cases_cell(file: &FileReport) -> Cell {
    if file.error.is_some() {
        dim_cell("-")
    } else {
        Cell::new(file.cases.len())
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
