//! Declaration model for competitive-programming test data.
//!
//! A problem declares typed variables, an IO format describing how those
//! variables are laid out as text, and constraints grouped into subtasks.
//! Reading and writing the text lives in `tcf-io`; checking constraints lives
//! in `tcf-verify`.
//!
//! # Example
//!
//! ```
//! use tcf_model::{
//!     ConstraintBlock, GridSegment, IoFormatBuilder, LineSegment, LinesSegment, ProblemSpec,
//!     Result, Scalar, Sequence, Size, Spec, Table, TestData, Variables,
//! };
//!
//! struct Problem {
//!     n: Scalar<usize>,
//!     v: Sequence<i64>,
//!     m: Table<i32>,
//! }
//!
//! impl ProblemSpec for Problem {
//!     fn declare(vars: &mut Variables) -> Result<Self> {
//!         Ok(Self {
//!             n: vars.scalar("N")?,
//!             v: vars.sequence("V")?,
//!             m: vars.table("M")?,
//!         })
//!     }
//!
//!     fn input_format(&self, format: &mut IoFormatBuilder) {
//!         let n = self.n;
//!         format
//!             .input(LineSegment::new().with(n))
//!             .input(LinesSegment::new().with_sequence(self.v).with_size(Size::rule(move |d| d[n])))
//!             .input(GridSegment::new(self.m, 2, 2));
//!     }
//!
//!     fn constraints(&self) -> Option<ConstraintBlock> {
//!         let n = self.n;
//!         Some(ConstraintBlock::new().with("1 <= N <= 10", move |d: &TestData| (1..=10).contains(&d[n])))
//!     }
//! }
//!
//! let spec = Spec::<Problem>::build().unwrap();
//! assert_eq!(spec.format().input().len(), 3);
//! assert_eq!(spec.suite().subtask_ids(), vec![-1]);
//! ```

mod constraint;
mod data;
mod error;
mod format;
mod multiple;
mod primitive;
mod problem;
mod segment;
pub mod token;
mod variable;

// Re-export error types
pub use error::{Result, SpecError};

// Variables and per-case values
pub use data::{Cell, ScalarCell, SequenceCell, Slot, TableCell, TestData};
pub use primitive::Primitive;
pub use variable::{
    RawScalar, RawSequence, Scalar, Sequence, Table, VarId, VariableDecl, VariableKind, Variables,
};

// IO layout
pub use format::{IoFormat, IoFormatBuilder};
pub use segment::{
    GridSegment, IoSegment, LineSegment, LinesSegment, LinesVariable, RawLineSegment,
    RawLinesSegment, SegmentKind, Size,
};

// Constraints and problem declaration
pub use constraint::{
    Constraint, ConstraintBlock, ConstraintSuite, ConstraintSuiteBuilder, FLAT_SUBTASK_ID, Subtask,
};
pub use multiple::{CASE_INDEX_PLACEHOLDER, MultipleTestCasesConfig};
pub use problem::{ProblemSpec, Spec};
