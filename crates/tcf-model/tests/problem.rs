use tcf_model::{
    ConstraintBlock, FLAT_SUBTASK_ID, GridSegment, IoFormatBuilder, LineSegment, LinesSegment,
    MultipleTestCasesConfig, ProblemSpec, RawLinesSegment, Result, Scalar, Sequence, SpecError,
    Spec, Table, TestData, Variables,
};

struct SubtaskProblem {
    a: Scalar<i64>,
    v: Sequence<i64>,
}

impl ProblemSpec for SubtaskProblem {
    fn declare(vars: &mut Variables) -> Result<Self> {
        Ok(Self {
            a: vars.scalar("A")?,
            v: vars.sequence("V")?,
        })
    }

    fn input_format(&self, format: &mut IoFormatBuilder) {
        format
            .input(LineSegment::new().with(self.a))
            .input(LinesSegment::new().with_sequence(self.v));
    }

    fn output_format(&self, format: &mut IoFormatBuilder) {
        format.output(LineSegment::new().with(self.a));
        format.output_variant();
        format.output(LinesSegment::new().with_sequence(self.v));
    }

    fn subtasks(&self) -> Vec<ConstraintBlock> {
        let a = self.a;
        vec![
            ConstraintBlock::new().with("1 <= A <= 1000", move |d: &TestData| {
                (1..=1000).contains(&d[a])
            }),
            ConstraintBlock::new().with("1 <= A <= 10", move |d: &TestData| {
                (1..=10).contains(&d[a])
            }),
        ]
    }

    fn slug(&self) -> &str {
        "subtask-problem"
    }
}

#[test]
fn builds_subtask_problem() {
    let spec = Spec::<SubtaskProblem>::build().expect("build");
    assert_eq!(spec.problem().slug(), "subtask-problem");
    assert_eq!(spec.variables().len(), 2);
    assert_eq!(spec.format().input().len(), 2);
    assert_eq!(spec.format().outputs().len(), 2);
    assert_eq!(spec.suite().subtask_ids(), vec![1, 2]);
    assert!(spec.multiple_test_cases().is_none());
}

struct DefaultsOnly {
    s: tcf_model::RawSequence,
}

impl ProblemSpec for DefaultsOnly {
    fn declare(vars: &mut Variables) -> Result<Self> {
        Ok(Self {
            s: vars.raw_sequence("S")?,
        })
    }

    fn input_format(&self, format: &mut IoFormatBuilder) {
        format.input(RawLinesSegment::new(self.s));
    }
}

#[test]
fn problem_without_constraints_has_empty_flat_subtask() {
    let spec = Spec::<DefaultsOnly>::build().expect("build");
    assert_eq!(spec.suite().subtask_ids(), vec![FLAT_SUBTASK_ID]);
    assert!(!spec.format().has_output());
    assert_eq!(spec.problem().slug(), "problem");
}

#[derive(Debug)]
struct Conflicting {
    a: Scalar<i32>,
}

impl ProblemSpec for Conflicting {
    fn declare(vars: &mut Variables) -> Result<Self> {
        Ok(Self {
            a: vars.scalar("A")?,
        })
    }

    fn input_format(&self, format: &mut IoFormatBuilder) {
        format.input(LineSegment::new().with(self.a));
    }

    fn constraints(&self) -> Option<ConstraintBlock> {
        Some(ConstraintBlock::new().with("always", |_: &TestData| true))
    }

    fn subtasks(&self) -> Vec<ConstraintBlock> {
        vec![ConstraintBlock::new()]
    }
}

#[test]
fn rejects_constraints_with_subtasks() {
    let err = Spec::<Conflicting>::build().expect_err("conflict");
    assert_eq!(
        err.to_string(),
        "Constraints and subtasks cannot be declared together"
    );
}

#[derive(Debug)]
struct CountWithoutConfig {
    a: Scalar<i32>,
}

impl ProblemSpec for CountWithoutConfig {
    fn declare(vars: &mut Variables) -> Result<Self> {
        Ok(Self {
            a: vars.scalar("A")?,
        })
    }

    fn input_format(&self, format: &mut IoFormatBuilder) {
        format.input(LineSegment::new().with(self.a));
    }

    fn multiple_test_cases_constraints(&self) -> Option<ConstraintBlock<usize>> {
        Some(ConstraintBlock::new().with("T <= 5", |t: &usize| *t <= 5))
    }
}

#[test]
fn rejects_count_constraints_without_config() {
    let err = Spec::<CountWithoutConfig>::build().expect_err("missing config");
    assert_eq!(err, SpecError::MultipleTestCasesConstraintsWithoutConfig);
}

struct MultiCase {
    m: Table<char>,
}

impl ProblemSpec for MultiCase {
    fn declare(vars: &mut Variables) -> Result<Self> {
        Ok(Self {
            m: vars.table("M")?,
        })
    }

    fn input_format(&self, format: &mut IoFormatBuilder) {
        format.input(GridSegment::new(self.m, 2, 3));
    }

    fn multiple_test_cases_config(&self) -> Option<MultipleTestCasesConfig> {
        Some(MultipleTestCasesConfig::new().with_output_prefix("Case #%d: "))
    }

    fn multiple_test_cases_constraints(&self) -> Option<ConstraintBlock<usize>> {
        Some(ConstraintBlock::new().with("1 <= T <= 20", |t: &usize| (1..=20).contains(t)))
    }
}

#[test]
fn builds_multiple_test_cases_problem() {
    let spec = Spec::<MultiCase>::build().expect("build");
    let config = spec.multiple_test_cases().expect("config");
    assert_eq!(config.prefix_for(2).as_deref(), Some("Case #2: "));
    assert_eq!(spec.suite().multiple_test_cases_constraints().len(), 1);
}

#[derive(Debug)]
struct UnsizedFirst {
    v: Sequence<i32>,
    a: Scalar<i32>,
}

impl ProblemSpec for UnsizedFirst {
    fn declare(vars: &mut Variables) -> Result<Self> {
        Ok(Self {
            v: vars.sequence("V")?,
            a: vars.scalar("A")?,
        })
    }

    fn input_format(&self, format: &mut IoFormatBuilder) {
        format
            .input(LinesSegment::new().with_sequence(self.v))
            .input(LineSegment::new().with(self.a));
    }
}

#[test]
fn rejects_unsized_lines_before_another_segment() {
    let err = Spec::<UnsizedFirst>::build().expect_err("unsized");
    assert_eq!(
        err.to_string(),
        "Lines segment without size can only be the last segment"
    );
}
