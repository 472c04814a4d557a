//! Per-segment parse and print algorithms.
//!
//! Parsing threads `last`, the display name of the most recently consumed slot,
//! through every segment so separator and EOF failures can name it.

use tcf_model::token;
use tcf_model::{
    Cell, GridSegment, IoSegment, LineSegment, LinesSegment, LinesVariable, RawLineSegment,
    RawLinesSegment, ScalarCell, SequenceCell, TableCell, TestData, VarId, VariableKind,
};

use crate::error::{CodecError, Result};
use crate::grammar::{TokenReader, TokenWriter};

fn kind_mismatch(name: &str, expected: VariableKind) -> CodecError {
    CodecError::KindMismatch {
        name: name.to_owned(),
        expected,
    }
}

fn unknown(id: VarId) -> CodecError {
    CodecError::UnknownVariable { index: id.index() }
}

fn scalar_mut(data: &mut TestData, id: VarId) -> Result<(&str, &mut dyn ScalarCell)> {
    match data.cell_mut(id).ok_or_else(|| unknown(id))? {
        (name, Cell::Scalar(cell)) => Ok((name, cell.as_mut())),
        (name, _) => Err(kind_mismatch(name, VariableKind::Scalar)),
    }
}

fn sequence_mut(data: &mut TestData, id: VarId) -> Result<(&str, &mut dyn SequenceCell)> {
    match data.cell_mut(id).ok_or_else(|| unknown(id))? {
        (name, Cell::Sequence(cell)) => Ok((name, cell.as_mut())),
        (name, _) => Err(kind_mismatch(name, VariableKind::Sequence)),
    }
}

fn table_mut(data: &mut TestData, id: VarId) -> Result<(&str, &mut dyn TableCell)> {
    match data.cell_mut(id).ok_or_else(|| unknown(id))? {
        (name, Cell::Table(cell)) => Ok((name, cell.as_mut())),
        (name, _) => Err(kind_mismatch(name, VariableKind::Table)),
    }
}

fn lookup(data: &TestData, id: VarId) -> Result<(&str, &Cell)> {
    let name = data.name(id).ok_or_else(|| unknown(id))?;
    let cell = data.cell(id).ok_or_else(|| unknown(id))?;
    Ok((name, cell))
}

fn scalar_ref(data: &TestData, id: VarId) -> Result<(&str, &dyn ScalarCell)> {
    match lookup(data, id)? {
        (name, Cell::Scalar(cell)) => Ok((name, cell.as_ref())),
        (name, _) => Err(kind_mismatch(name, VariableKind::Scalar)),
    }
}

fn sequence_ref(data: &TestData, id: VarId) -> Result<(&str, &dyn SequenceCell)> {
    match lookup(data, id)? {
        (name, Cell::Sequence(cell)) => Ok((name, cell.as_ref())),
        (name, _) => Err(kind_mismatch(name, VariableKind::Sequence)),
    }
}

fn table_ref(data: &TestData, id: VarId) -> Result<(&str, &dyn TableCell)> {
    match lookup(data, id)? {
        (name, Cell::Table(cell)) => Ok((name, cell.as_ref())),
        (name, _) => Err(kind_mismatch(name, VariableKind::Table)),
    }
}

fn after(last: &Option<String>) -> &str {
    last.as_deref().unwrap_or_default()
}

/// Parse `segments` in order into `data`.
pub(crate) fn parse_segments(
    segments: &[IoSegment],
    data: &mut TestData,
    reader: &mut TokenReader<'_>,
    last: &mut Option<String>,
) -> Result<()> {
    for segment in segments {
        match segment {
            IoSegment::Line(line) => parse_line(line, data, reader, last)?,
            IoSegment::RawLine(raw_line) => parse_raw_line(raw_line, data, reader, last)?,
            IoSegment::Lines(lines) => parse_lines(lines, data, reader, last)?,
            IoSegment::RawLines(raw_lines) => parse_raw_lines(raw_lines, data, reader, last)?,
            IoSegment::Grid(grid) => parse_grid(grid, data, reader, last)?,
        }
    }
    Ok(())
}

fn parse_line(
    segment: &LineSegment,
    data: &mut TestData,
    reader: &mut TokenReader<'_>,
    last: &mut Option<String>,
) -> Result<()> {
    for (column, &id) in segment.variables().iter().enumerate() {
        if column > 0 {
            reader.expect_single_space(after(last))?;
        }
        let (name, cell) = scalar_mut(data, id)?;
        let context = token::scalar(name);
        let value = reader.read_token(&context)?;
        if !cell.parse_token(value) {
            return Err(CodecError::invalid_token(context, value));
        }
        *last = Some(context);
    }
    reader.expect_newline(last.as_deref())
}

fn parse_raw_line(
    segment: &RawLineSegment,
    data: &mut TestData,
    reader: &mut TokenReader<'_>,
    last: &mut Option<String>,
) -> Result<()> {
    let (name, cell) = scalar_mut(data, segment.variable())?;
    let context = token::scalar(name);
    let line = reader.read_line();
    if !cell.parse_token(line) {
        return Err(CodecError::invalid_token(context, line));
    }
    *last = Some(context);
    reader.expect_newline(last.as_deref())
}

/// Whether another row should be read: `rows` rows when sized, otherwise until EOF.
fn has_next_row(row: usize, rows: Option<usize>, reader: &TokenReader<'_>) -> bool {
    match rows {
        Some(rows) => row < rows,
        None => !reader.is_eof(),
    }
}

fn parse_lines(
    segment: &LinesSegment,
    data: &mut TestData,
    reader: &mut TokenReader<'_>,
    last: &mut Option<String>,
) -> Result<()> {
    let rows = segment.size().map(|size| size.resolve(&*data));
    for variable in segment.variables() {
        match *variable {
            LinesVariable::Sequence(id) => sequence_mut(data, id)?.1.clear(),
            LinesVariable::Table(id) => table_mut(data, id)?.1.clear(),
        }
    }

    let mut row = 0;
    while has_next_row(row, rows, reader) {
        for (column, variable) in segment.variables().iter().enumerate() {
            match *variable {
                LinesVariable::Sequence(id) => {
                    if column > 0 {
                        reader.expect_single_space(after(last))?;
                    }
                    let (name, cell) = sequence_mut(data, id)?;
                    let context = token::sequence_element(name, row);
                    let value = reader.read_token(&context)?;
                    if !cell.push_token(value) {
                        return Err(CodecError::invalid_token(context, value));
                    }
                    *last = Some(context);
                }
                LinesVariable::Table(id) => {
                    let spaced = column > 0 && !reader.can_peek_newline();
                    if spaced {
                        reader.expect_single_space(after(last))?;
                    }
                    parse_table_row(data, id, row, spaced, reader, last)?;
                }
            }
        }
        reader.expect_newline(last.as_deref())?;
        row += 1;
    }
    Ok(())
}

/// Parse one jagged row: cells until the end of the line.
///
/// A row that follows a separating space must hold at least one cell.
fn parse_table_row(
    data: &mut TestData,
    id: VarId,
    row: usize,
    spaced: bool,
    reader: &mut TokenReader<'_>,
    last: &mut Option<String>,
) -> Result<()> {
    let (name, cell) = table_mut(data, id)?;
    cell.push_row();
    let mut column = 0;
    while (spaced && column == 0) || (!reader.is_eof() && !reader.can_peek_newline()) {
        if column > 0 {
            reader.expect_single_space(after(last))?;
        }
        let context = token::table_cell(name, row, column);
        let value = reader.read_token(&context)?;
        if !cell.push_token(value) {
            return Err(CodecError::invalid_token(context, value));
        }
        *last = Some(context);
        column += 1;
    }
    Ok(())
}

fn parse_raw_lines(
    segment: &RawLinesSegment,
    data: &mut TestData,
    reader: &mut TokenReader<'_>,
    last: &mut Option<String>,
) -> Result<()> {
    let rows = segment.size().map(|size| size.resolve(&*data));
    let (name, cell) = sequence_mut(data, segment.variable())?;
    cell.clear();
    let mut row = 0;
    while has_next_row(row, rows, reader) {
        let context = token::sequence_element(name, row);
        let line = reader.read_line();
        if !cell.push_token(line) {
            return Err(CodecError::invalid_token(context, line));
        }
        *last = Some(context);
        reader.expect_newline(last.as_deref())?;
        row += 1;
    }
    Ok(())
}

fn parse_grid(
    segment: &GridSegment,
    data: &mut TestData,
    reader: &mut TokenReader<'_>,
    last: &mut Option<String>,
) -> Result<()> {
    let rows = segment.rows().resolve(data);
    let columns = segment.columns().resolve(data);
    let (name, cell) = table_mut(data, segment.variable())?;
    if columns == 0 {
        return Err(CodecError::ZeroGridColumns {
            name: name.to_owned(),
        });
    }
    cell.clear();
    for row in 0..rows {
        cell.push_row();
        for column in 0..columns {
            if column > 0 {
                reader.expect_single_space(after(last))?;
            }
            let context = token::table_cell(name, row, column);
            let value = reader.read_token(&context)?;
            if !cell.push_token(value) {
                return Err(CodecError::invalid_token(context, value));
            }
            *last = Some(context);
        }
        reader.expect_newline(last.as_deref())?;
    }
    Ok(())
}

/// Print `segments` in order from `data`.
pub(crate) fn print_segments(
    segments: &[IoSegment],
    data: &TestData,
    writer: &mut TokenWriter,
) -> Result<()> {
    for segment in segments {
        match segment {
            IoSegment::Line(line) => print_line(line, data, writer)?,
            IoSegment::RawLine(raw_line) => print_raw_line(raw_line, data, writer)?,
            IoSegment::Lines(lines) => print_lines(lines, data, writer)?,
            IoSegment::RawLines(raw_lines) => print_raw_lines(raw_lines, data, writer)?,
            IoSegment::Grid(grid) => print_grid(grid, data, writer)?,
        }
    }
    Ok(())
}

fn print_line(segment: &LineSegment, data: &TestData, writer: &mut TokenWriter) -> Result<()> {
    for (column, &id) in segment.variables().iter().enumerate() {
        if column > 0 {
            writer.space();
        }
        scalar_ref(data, id)?.1.write_to(writer.buffer());
    }
    writer.newline();
    Ok(())
}

fn print_raw_line(
    segment: &RawLineSegment,
    data: &TestData,
    writer: &mut TokenWriter,
) -> Result<()> {
    scalar_ref(data, segment.variable())?
        .1
        .write_to(writer.buffer());
    writer.newline();
    Ok(())
}

/// Number of rows a lines segment prints; without a size, the first variable decides.
fn lines_row_count(segment: &LinesSegment, data: &TestData) -> Result<usize> {
    if let Some(size) = segment.size() {
        return Ok(size.resolve(data));
    }
    match segment.variables().first() {
        Some(LinesVariable::Sequence(id)) => Ok(sequence_ref(data, *id)?.1.len()),
        Some(LinesVariable::Table(id)) => Ok(table_ref(data, *id)?.1.rows()),
        None => Ok(0),
    }
}

fn print_lines(segment: &LinesSegment, data: &TestData, writer: &mut TokenWriter) -> Result<()> {
    let rows = lines_row_count(segment, data)?;
    for variable in segment.variables() {
        match *variable {
            LinesVariable::Sequence(id) => {
                let (name, cell) = sequence_ref(data, id)?;
                if cell.len() != rows {
                    return Err(CodecError::vector_size(name, rows, cell.len()));
                }
            }
            LinesVariable::Table(id) => {
                let (name, cell) = table_ref(data, id)?;
                if cell.rows() != rows {
                    return Err(CodecError::jagged_vector_size(name, rows, cell.rows()));
                }
            }
        }
    }

    for row in 0..rows {
        for (column, variable) in segment.variables().iter().enumerate() {
            match *variable {
                LinesVariable::Sequence(id) => {
                    if column > 0 {
                        writer.space();
                    }
                    sequence_ref(data, id)?
                        .1
                        .write_element(row, writer.buffer());
                }
                LinesVariable::Table(id) => {
                    let cell = table_ref(data, id)?.1;
                    let width = cell.row_len(row);
                    if column > 0 && width > 0 {
                        writer.space();
                    }
                    for cell_column in 0..width {
                        if cell_column > 0 {
                            writer.space();
                        }
                        cell.write_cell(row, cell_column, writer.buffer());
                    }
                }
            }
        }
        writer.newline();
    }
    Ok(())
}

fn print_raw_lines(
    segment: &RawLinesSegment,
    data: &TestData,
    writer: &mut TokenWriter,
) -> Result<()> {
    let (name, cell) = sequence_ref(data, segment.variable())?;
    let rows = segment
        .size()
        .map_or(cell.len(), |size| size.resolve(data));
    if cell.len() != rows {
        return Err(CodecError::vector_size(name, rows, cell.len()));
    }
    for row in 0..rows {
        cell.write_element(row, writer.buffer());
        writer.newline();
    }
    Ok(())
}

fn print_grid(segment: &GridSegment, data: &TestData, writer: &mut TokenWriter) -> Result<()> {
    let rows = segment.rows().resolve(data);
    let columns = segment.columns().resolve(data);
    let (name, cell) = table_ref(data, segment.variable())?;
    if columns == 0 {
        return Err(CodecError::ZeroGridColumns {
            name: name.to_owned(),
        });
    }
    if cell.rows() != rows {
        return Err(CodecError::GridRowsMismatch {
            name: name.to_owned(),
            expected: rows,
            actual: cell.rows(),
        });
    }
    for row in 0..rows {
        if cell.row_len(row) != columns {
            return Err(CodecError::GridColumnsMismatch {
                row,
                name: name.to_owned(),
                expected: columns,
                actual: cell.row_len(row),
            });
        }
    }

    for row in 0..rows {
        for column in 0..columns {
            if column > 0 {
                writer.space();
            }
            cell.write_cell(row, column, writer.buffer());
        }
        writer.newline();
    }
    Ok(())
}
