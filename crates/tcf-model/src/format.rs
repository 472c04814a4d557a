//! IO format: the ordered input segments plus zero or more output variants.

use crate::error::{Result, SpecError};
use crate::segment::{IoSegment, LinesVariable};
use crate::variable::Variables;

/// A validated IO format. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct IoFormat {
    input: Vec<IoSegment>,
    outputs: Vec<Vec<IoSegment>>,
}

impl IoFormat {
    pub fn builder() -> IoFormatBuilder {
        IoFormatBuilder::default()
    }

    pub fn input(&self) -> &[IoSegment] {
        &self.input
    }

    /// Output variants; empty when the problem declares no output format.
    pub fn outputs(&self) -> &[Vec<IoSegment>] {
        &self.outputs
    }

    pub fn has_output(&self) -> bool {
        !self.outputs.is_empty()
    }
}

/// Collects segments in declaration order.
///
/// `output` appends to the current output variant; `output_variant` starts the
/// next one. Variants left empty are dropped.
#[derive(Debug, Clone, Default)]
pub struct IoFormatBuilder {
    input: Vec<IoSegment>,
    outputs: Vec<Vec<IoSegment>>,
}

impl IoFormatBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an input segment.
    pub fn input(&mut self, segment: impl Into<IoSegment>) -> &mut Self {
        self.input.push(segment.into());
        self
    }

    /// Append a segment to the current output variant.
    pub fn output(&mut self, segment: impl Into<IoSegment>) -> &mut Self {
        if self.outputs.is_empty() {
            self.outputs.push(Vec::new());
        }
        if let Some(current) = self.outputs.last_mut() {
            current.push(segment.into());
        }
        self
    }

    /// Start another output variant.
    pub fn output_variant(&mut self) -> &mut Self {
        if self.outputs.last().is_some_and(|current| !current.is_empty()) {
            self.outputs.push(Vec::new());
        }
        self
    }

    /// Validate the layout and freeze it.
    ///
    /// Without a registry a zero-column grid is named by its id (`'#0'`);
    /// [`build_for`](Self::build_for) reports the declared name.
    pub fn build(&self) -> Result<IoFormat> {
        self.finish(None)
    }

    /// Like [`build`](Self::build), also checking every handle against `variables`.
    pub fn build_for(&self, variables: &Variables) -> Result<IoFormat> {
        self.finish(Some(variables))
    }

    fn finish(&self, variables: Option<&Variables>) -> Result<IoFormat> {
        validate_segments(&self.input, variables)?;
        let outputs: Vec<Vec<IoSegment>> = self
            .outputs
            .iter()
            .filter(|segments| !segments.is_empty())
            .cloned()
            .collect();
        for segments in &outputs {
            validate_segments(segments, variables)?;
        }
        Ok(IoFormat {
            input: self.input.clone(),
            outputs,
        })
    }
}

fn validate_segments(segments: &[IoSegment], variables: Option<&Variables>) -> Result<()> {
    let last = segments.len().saturating_sub(1);
    for (index, segment) in segments.iter().enumerate() {
        if let Some(variables) = variables {
            for id in segment.variables() {
                variables.require(id)?;
            }
        }
        match segment {
            IoSegment::Lines(lines) => {
                if lines.variables().is_empty() {
                    return Err(SpecError::EmptyLinesSegment);
                }
                let columns = lines.variables().len();
                let jagged_not_last = lines
                    .variables()
                    .iter()
                    .take(columns - 1)
                    .any(|variable| matches!(variable, LinesVariable::Table(_)));
                if jagged_not_last {
                    return Err(SpecError::JaggedVectorNotLast);
                }
                if segment.is_unsized() && index != last {
                    return Err(SpecError::UnsizedLinesNotLast);
                }
            }
            IoSegment::RawLines(_) => {
                if segment.is_unsized() && index != last {
                    return Err(SpecError::UnsizedRawLinesNotLast);
                }
            }
            IoSegment::Grid(grid) => {
                if grid.columns().fixed() == Some(0) {
                    let name = match variables {
                        Some(variables) => variables.require(grid.variable())?.name().to_string(),
                        None => format!("#{}", grid.variable().index()),
                    };
                    return Err(SpecError::zero_grid_columns(name));
                }
            }
            IoSegment::Line(_) | IoSegment::RawLine(_) => {}
        }
    }
    Ok(())
}
