//! IO segments: ordered groups of variables plus a layout rule.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::TestData;
use crate::primitive::Primitive;
use crate::variable::{RawScalar, RawSequence, Scalar, Sequence, Table, VarId};

/// Row or column count of a segment.
#[derive(Clone)]
pub enum Size {
    /// Known at declaration time.
    Fixed(usize),
    /// Computed from the test case at parse/print time (e.g. from a scalar `N`).
    Rule(Arc<dyn Fn(&TestData) -> usize + Send + Sync>),
}

impl Size {
    /// Size computed from the test case values.
    pub fn rule(rule: impl Fn(&TestData) -> usize + Send + Sync + 'static) -> Self {
        Self::Rule(Arc::new(rule))
    }

    /// Evaluate against the current values.
    pub fn resolve(&self, data: &TestData) -> usize {
        match self {
            Self::Fixed(size) => *size,
            Self::Rule(rule) => rule(data),
        }
    }

    /// The fixed value, if any.
    pub fn fixed(&self) -> Option<usize> {
        match self {
            Self::Fixed(size) => Some(*size),
            Self::Rule(_) => None,
        }
    }
}

impl From<usize> for Size {
    fn from(size: usize) -> Self {
        Self::Fixed(size)
    }
}

impl fmt::Debug for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(size) => f.debug_tuple("Fixed").field(size).finish(),
            Self::Rule(_) => f.write_str("Rule(..)"),
        }
    }
}

/// Layout rule of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Line,
    RawLine,
    Lines,
    RawLines,
    Grid,
}

impl SegmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::RawLine => "raw line",
            Self::Lines => "lines",
            Self::RawLines => "raw lines",
            Self::Grid => "grid",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalars on one line, separated by single spaces.
#[derive(Debug, Clone, Default)]
pub struct LineSegment {
    variables: Vec<VarId>,
}

impl LineSegment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scalar.
    #[must_use]
    pub fn with<T: Primitive>(mut self, scalar: Scalar<T>) -> Self {
        self.variables.push(scalar.id());
        self
    }

    pub fn variables(&self) -> &[VarId] {
        &self.variables
    }
}

/// One raw scalar occupying a whole line.
#[derive(Debug, Clone)]
pub struct RawLineSegment {
    variable: VarId,
}

impl RawLineSegment {
    pub fn new(scalar: RawScalar) -> Self {
        Self {
            variable: scalar.id(),
        }
    }

    pub fn variable(&self) -> VarId {
        self.variable
    }
}

/// A column of a [`LinesSegment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinesVariable {
    /// One element per row.
    Sequence(VarId),
    /// One whole (possibly empty) row per row.
    Table(VarId),
}

impl LinesVariable {
    pub fn id(self) -> VarId {
        match self {
            Self::Sequence(id) | Self::Table(id) => id,
        }
    }
}

/// Sequences and tables read column-wise, one row per line.
///
/// Without a size the segment consumes rows until the end of input.
#[derive(Debug, Clone, Default)]
pub struct LinesSegment {
    variables: Vec<LinesVariable>,
    size: Option<Size>,
}

impl LinesSegment {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sequence<T: Primitive>(mut self, sequence: Sequence<T>) -> Self {
        self.variables.push(LinesVariable::Sequence(sequence.id()));
        self
    }

    /// Append a table; each line contributes one row of it.
    #[must_use]
    pub fn with_table<T: Primitive>(mut self, table: Table<T>) -> Self {
        self.variables.push(LinesVariable::Table(table.id()));
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn variables(&self) -> &[LinesVariable] {
        &self.variables
    }

    pub fn size(&self) -> Option<&Size> {
        self.size.as_ref()
    }
}

/// A raw sequence, one whole line per element.
#[derive(Debug, Clone)]
pub struct RawLinesSegment {
    variable: VarId,
    size: Option<Size>,
}

impl RawLinesSegment {
    pub fn new(sequence: RawSequence) -> Self {
        Self {
            variable: sequence.id(),
            size: None,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn variable(&self) -> VarId {
        self.variable
    }

    pub fn size(&self) -> Option<&Size> {
        self.size.as_ref()
    }
}

/// A table with a fixed number of rows and columns.
#[derive(Debug, Clone)]
pub struct GridSegment {
    variable: VarId,
    rows: Size,
    columns: Size,
}

impl GridSegment {
    pub fn new<T: Primitive>(
        table: Table<T>,
        rows: impl Into<Size>,
        columns: impl Into<Size>,
    ) -> Self {
        Self {
            variable: table.id(),
            rows: rows.into(),
            columns: columns.into(),
        }
    }

    pub fn variable(&self) -> VarId {
        self.variable
    }

    pub fn rows(&self) -> &Size {
        &self.rows
    }

    pub fn columns(&self) -> &Size {
        &self.columns
    }
}

/// One segment of an IO format.
#[derive(Debug, Clone)]
pub enum IoSegment {
    Line(LineSegment),
    RawLine(RawLineSegment),
    Lines(LinesSegment),
    RawLines(RawLinesSegment),
    Grid(GridSegment),
}

impl IoSegment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Self::Line(_) => SegmentKind::Line,
            Self::RawLine(_) => SegmentKind::RawLine,
            Self::Lines(_) => SegmentKind::Lines,
            Self::RawLines(_) => SegmentKind::RawLines,
            Self::Grid(_) => SegmentKind::Grid,
        }
    }

    /// Variables in declaration order.
    pub fn variables(&self) -> Vec<VarId> {
        match self {
            Self::Line(segment) => segment.variables.clone(),
            Self::RawLine(segment) => vec![segment.variable],
            Self::Lines(segment) => segment.variables.iter().copied().map(LinesVariable::id).collect(),
            Self::RawLines(segment) => vec![segment.variable],
            Self::Grid(segment) => vec![segment.variable],
        }
    }

    /// Whether the segment consumes rows until the end of input.
    pub fn is_unsized(&self) -> bool {
        match self {
            Self::Lines(segment) => segment.size.is_none(),
            Self::RawLines(segment) => segment.size.is_none(),
            Self::Line(_) | Self::RawLine(_) | Self::Grid(_) => false,
        }
    }
}

impl From<LineSegment> for IoSegment {
    fn from(segment: LineSegment) -> Self {
        Self::Line(segment)
    }
}

impl From<RawLineSegment> for IoSegment {
    fn from(segment: RawLineSegment) -> Self {
        Self::RawLine(segment)
    }
}

impl From<LinesSegment> for IoSegment {
    fn from(segment: LinesSegment) -> Self {
        Self::Lines(segment)
    }
}

impl From<RawLinesSegment> for IoSegment {
    fn from(segment: RawLinesSegment) -> Self {
        Self::RawLines(segment)
    }
}

impl From<GridSegment> for IoSegment {
    fn from(segment: GridSegment) -> Self {
        Self::Grid(segment)
    }
}
