//! Problem declaration protocol.
//!
//! An author implements [`ProblemSpec`] once; [`Spec::build`] collects the
//! variables, IO format and constraint suite it declares.

use crate::constraint::{ConstraintBlock, ConstraintSuite};
use crate::error::{Result, SpecError};
use crate::format::{IoFormat, IoFormatBuilder};
use crate::multiple::MultipleTestCasesConfig;
use crate::variable::Variables;

/// A problem: its variables, IO layout and constraints.
///
/// Only [`declare`](Self::declare) and [`input_format`](Self::input_format) are
/// required. Every other hook has an "absent" default.
pub trait ProblemSpec: Sized {
    /// Declare the variables and keep their handles.
    fn declare(variables: &mut Variables) -> Result<Self>;

    fn input_format(&self, format: &mut IoFormatBuilder);

    /// Output segments. Call `format.output_variant()` to separate alternatives.
    fn output_format(&self, _format: &mut IoFormatBuilder) {}

    /// Flat constraints, when the problem has no subtasks.
    fn constraints(&self) -> Option<ConstraintBlock> {
        None
    }

    /// Subtasks in order; the first has id 1.
    fn subtasks(&self) -> Vec<ConstraintBlock> {
        Vec::new()
    }

    fn multiple_test_cases_config(&self) -> Option<MultipleTestCasesConfig> {
        None
    }

    /// Constraints on the number of test cases in a file.
    fn multiple_test_cases_constraints(&self) -> Option<ConstraintBlock<usize>> {
        None
    }

    /// Short identifier used in reports.
    fn slug(&self) -> &str {
        "problem"
    }
}

/// A fully built problem.
#[derive(Debug, Clone)]
pub struct Spec<P> {
    problem: P,
    variables: Variables,
    format: IoFormat,
    suite: ConstraintSuite,
    multiple_test_cases: Option<MultipleTestCasesConfig>,
}

impl<P: ProblemSpec> Spec<P> {
    /// Run every declaration hook once and validate the result.
    pub fn build() -> Result<Self> {
        let mut variables = Variables::new();
        let problem = P::declare(&mut variables)?;

        let mut builder = IoFormatBuilder::new();
        problem.input_format(&mut builder);
        problem.output_format(&mut builder);
        let format = builder.build_for(&variables)?;

        let multiple_test_cases = problem.multiple_test_cases_config();
        let mut suite = ConstraintSuite::builder();
        if let Some(block) = problem.constraints() {
            suite = suite.constraints(block);
        }
        for block in problem.subtasks() {
            suite = suite.subtask(block);
        }
        if let Some(block) = problem.multiple_test_cases_constraints() {
            if multiple_test_cases.is_none() {
                return Err(SpecError::MultipleTestCasesConstraintsWithoutConfig);
            }
            suite = suite.multiple_test_cases_constraints(block);
        }

        Ok(Self {
            problem,
            variables,
            format,
            suite: suite.build()?,
            multiple_test_cases,
        })
    }
}

impl<P> Spec<P> {
    /// The author's value holding the variable handles.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn format(&self) -> &IoFormat {
        &self.format
    }

    pub fn suite(&self) -> &ConstraintSuite {
        &self.suite
    }

    pub fn multiple_test_cases(&self) -> Option<&MultipleTestCasesConfig> {
        self.multiple_test_cases.as_ref()
    }
}
