//! Demo runner: sum of an array, with two subtasks.

use tcf_model::{
    ConstraintBlock, IoFormatBuilder, LineSegment, LinesSegment, ProblemSpec, Result, Scalar,
    Sequence, Size, TestData, Variables,
};

struct ArraySum {
    n: Scalar<usize>,
    a: Sequence<i64>,
    sum: Scalar<i64>,
}

fn values_within(data: &TestData, a: Sequence<i64>, limit: i64) -> bool {
    data[a].iter().all(|value| value.abs() <= limit)
}

impl ProblemSpec for ArraySum {
    fn declare(vars: &mut Variables) -> Result<Self> {
        Ok(Self {
            n: vars.scalar("N")?,
            a: vars.sequence("A")?,
            sum: vars.scalar("SUM")?,
        })
    }

    fn input_format(&self, format: &mut IoFormatBuilder) {
        let n = self.n;
        format
            .input(LineSegment::new().with(n))
            .input(LinesSegment::new().with_sequence(self.a).with_size(Size::rule(move |d| d[n])));
    }

    fn output_format(&self, format: &mut IoFormatBuilder) {
        format.output(LineSegment::new().with(self.sum));
    }

    fn subtasks(&self) -> Vec<ConstraintBlock> {
        let (n, a) = (self.n, self.a);
        vec![
            ConstraintBlock::new()
                .with("1 <= N <= 10", move |d: &TestData| (1..=10).contains(&d[n]))
                .with("|A[i]| <= 1000", move |d: &TestData| values_within(d, a, 1000)),
            ConstraintBlock::new()
                .with("1 <= N <= 100000", move |d: &TestData| {
                    (1..=100_000).contains(&d[n])
                })
                .with("|A[i]| <= 1000000000", move |d: &TestData| {
                    values_within(d, a, 1_000_000_000)
                }),
        ]
    }

    fn slug(&self) -> &str {
        "array-sum"
    }
}

fn main() {
    std::process::exit(tcf_cli::run::<ArraySum>());
}
