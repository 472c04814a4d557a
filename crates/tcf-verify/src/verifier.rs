//! Cross-checks a test case against the constraint suite and its declared subtasks.

use std::collections::BTreeSet;

use tcf_model::{Constraint, ConstraintSuite, Subtask, TestData};
use tracing::debug;

use crate::report::{Failure, VerificationResult};

/// Evaluates a [`ConstraintSuite`] against test cases.
///
/// Holds no state between calls; the same verifier may check any number of cases.
#[derive(Debug, Clone, Copy)]
pub struct Verifier<'s> {
    suite: &'s ConstraintSuite,
}

impl<'s> Verifier<'s> {
    pub fn new(suite: &'s ConstraintSuite) -> Self {
        Self { suite }
    }

    pub fn suite(&self) -> &'s ConstraintSuite {
        self.suite
    }

    /// Verify one parsed test case declared to belong to `declared`.
    ///
    /// Every subtask is evaluated even after the first failure. For numbered
    /// subtasks a case must satisfy each subtask it is assigned to, and must not
    /// satisfy any subtask it is not assigned to. The flat subtask ignores
    /// `declared` and only requires its constraints to hold.
    pub fn verify_test_case(&self, data: &TestData, declared: &BTreeSet<i32>) -> VerificationResult {
        let mut result = VerificationResult::new();
        for subtask in self.suite.subtasks() {
            let unsatisfied = failing_descriptions(subtask.constraints(), data);
            debug!(
                subtask = subtask.id(),
                constraints = subtask.constraints().len(),
                failed = unsatisfied.len(),
                "evaluated subtask"
            );
            check_subtask(subtask, &unsatisfied, declared, &mut result);
        }
        result
    }

    /// Verify the multiple test cases constraints against the number of cases in a file.
    pub fn verify_multiple_test_cases(&self, count: usize) -> VerificationResult {
        let unsatisfied = failing_descriptions(self.suite.multiple_test_cases_constraints(), &count);
        debug!(count, failed = unsatisfied.len(), "evaluated multiple test cases constraints");
        let mut result = VerificationResult::new();
        if !unsatisfied.is_empty() {
            result.push(Failure::heading(
                "Does not satisfy multiple test cases constraints, on:",
            ));
            result
                .failures
                .extend(unsatisfied.into_iter().map(Failure::detail));
        }
        result
    }

    /// Ids of the subtasks whose constraints all hold for `data`.
    pub fn satisfied_subtasks(&self, data: &TestData) -> BTreeSet<i32> {
        self.suite
            .subtasks()
            .iter()
            .filter(|subtask| subtask.constraints().iter().all(|c| c.holds(data)))
            .map(Subtask::id)
            .collect()
    }
}

/// Descriptions of the constraints that do not hold, in declaration order.
fn failing_descriptions<S: ?Sized>(constraints: &[Constraint<S>], subject: &S) -> Vec<String> {
    constraints
        .iter()
        .filter(|constraint| !constraint.holds(subject))
        .map(|constraint| constraint.description().to_owned())
        .collect()
}

fn check_subtask(
    subtask: &Subtask,
    unsatisfied: &[String],
    declared: &BTreeSet<i32>,
    result: &mut VerificationResult,
) {
    if subtask.is_flat() {
        if !unsatisfied.is_empty() {
            result.push(Failure::heading("Does not satisfy constraints, on:"));
            push_details(unsatisfied, result);
        }
        return;
    }

    let id = subtask.id();
    match (declared.contains(&id), unsatisfied.is_empty()) {
        (true, false) => {
            result.push(Failure::heading(format!(
                "Does not satisfy subtask {id}, on constraints:"
            )));
            push_details(unsatisfied, result);
        }
        (false, true) => {
            result.push(Failure::heading(format!(
                "Satisfies subtask {id} but is not assigned to it"
            )));
        }
        (true, true) | (false, false) => {}
    }
}

fn push_details(descriptions: &[String], result: &mut VerificationResult) {
    for description in descriptions {
        result.push(Failure::detail(description.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcf_model::{ConstraintBlock, Scalar, Variables};

    fn scalars() -> (Variables, Scalar<i64>, Scalar<i64>) {
        let mut vars = Variables::new();
        let a = vars.scalar::<i64>("A").unwrap();
        let b = vars.scalar::<i64>("B").unwrap();
        (vars, a, b)
    }

    #[test]
    fn test_flat_constraints_report_only_violations() {
        let (vars, a, b) = scalars();
        let suite = ConstraintSuite::builder()
            .constraints(
                ConstraintBlock::new()
                    .with("1 <= A <= 100", move |d: &TestData| (1..=100).contains(&d[a]))
                    .with("1 <= B <= 100", move |d: &TestData| (1..=100).contains(&d[b])),
            )
            .build()
            .unwrap();
        let mut data = vars.instantiate();
        data[a] = 5;
        data[b] = 500;

        let result = Verifier::new(&suite).verify_test_case(&data, &BTreeSet::new());
        assert_eq!(
            result.failures,
            vec![
                Failure::heading("Does not satisfy constraints, on:"),
                Failure::detail("1 <= B <= 100"),
            ]
        );
    }

    #[test]
    fn test_flat_group_ignores_declared_set() {
        let (vars, a, _) = scalars();
        let suite = ConstraintSuite::builder()
            .constraints(ConstraintBlock::new().with("A > 0", move |d: &TestData| d[a] > 0))
            .build()
            .unwrap();
        let mut data = vars.instantiate();
        data[a] = 1;
        let declared = BTreeSet::from([1, 2]);
        assert!(Verifier::new(&suite).verify_test_case(&data, &declared).is_ok());
    }

    #[test]
    fn test_empty_undeclared_subtask_is_satisfied() {
        let (vars, _, _) = scalars();
        let suite = ConstraintSuite::builder()
            .subtask(ConstraintBlock::new())
            .subtask(ConstraintBlock::new())
            .build()
            .unwrap();
        let data = vars.instantiate();
        let result = Verifier::new(&suite).verify_test_case(&data, &BTreeSet::from([1]));
        assert_eq!(
            result.failures,
            vec![Failure::heading("Satisfies subtask 2 but is not assigned to it")]
        );
    }

    #[test]
    fn test_satisfied_subtasks() {
        let (vars, a, _) = scalars();
        let suite = ConstraintSuite::builder()
            .subtask(ConstraintBlock::new().with("A <= 10", move |d: &TestData| d[a] <= 10))
            .subtask(ConstraintBlock::new().with("A <= 1", move |d: &TestData| d[a] <= 1))
            .build()
            .unwrap();
        let mut data = vars.instantiate();
        data[a] = 7;
        assert_eq!(
            Verifier::new(&suite).satisfied_subtasks(&data),
            BTreeSet::from([1])
        );
    }

    #[test]
    fn test_multiple_test_cases_constraints() {
        let suite = ConstraintSuite::builder()
            .multiple_test_cases_constraints(
                ConstraintBlock::new()
                    .with("1 <= T <= 3", |t: &usize| (1..=3).contains(t))
                    .with("T is odd", |t: &usize| t % 2 == 1),
            )
            .build()
            .unwrap();
        let verifier = Verifier::new(&suite);
        assert!(verifier.verify_multiple_test_cases(3).is_ok());
        assert_eq!(
            verifier.verify_multiple_test_cases(4).failures,
            vec![
                Failure::heading("Does not satisfy multiple test cases constraints, on:"),
                Failure::detail("1 <= T <= 3"),
                Failure::detail("T is odd"),
            ]
        );
    }
}
