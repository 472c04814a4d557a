//! Constraints, subtasks and the constraint suite.

use std::fmt;
use std::sync::Arc;

use crate::data::TestData;
use crate::error::{Result, SpecError};

/// Id of the single ungrouped subtask used when a problem declares no subtasks.
pub const FLAT_SUBTASK_ID: i32 = -1;

/// A named boolean predicate.
///
/// Per-case constraints are evaluated against [`TestData`]; multiple test cases
/// constraints are evaluated against the case count (`Constraint<usize>`).
pub struct Constraint<S: ?Sized = TestData> {
    description: String,
    predicate: Arc<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S: ?Sized> Constraint<S> {
    pub fn new(
        description: impl Into<String>,
        predicate: impl Fn(&S) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Evaluate the predicate.
    pub fn holds(&self, subject: &S) -> bool {
        (self.predicate)(subject)
    }
}

impl<S: ?Sized> Clone for Constraint<S> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: ?Sized> fmt::Debug for Constraint<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// An ordered list of constraints, as declared by an author.
pub struct ConstraintBlock<S: ?Sized = TestData> {
    constraints: Vec<Constraint<S>>,
}

impl<S: ?Sized> ConstraintBlock<S> {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// Append a constraint.
    #[must_use]
    pub fn with(
        mut self,
        description: impl Into<String>,
        predicate: impl Fn(&S) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.constraints.push(Constraint::new(description, predicate));
        self
    }

    pub fn push(&mut self, constraint: Constraint<S>) {
        self.constraints.push(constraint);
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn into_constraints(self) -> Vec<Constraint<S>> {
        self.constraints
    }
}

impl<S: ?Sized> Default for ConstraintBlock<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> Clone for ConstraintBlock<S> {
    fn clone(&self) -> Self {
        Self {
            constraints: self.constraints.clone(),
        }
    }
}

impl<S: ?Sized> fmt::Debug for ConstraintBlock<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.constraints).finish()
    }
}

impl<S: ?Sized> FromIterator<Constraint<S>> for ConstraintBlock<S> {
    fn from_iter<I: IntoIterator<Item = Constraint<S>>>(iter: I) -> Self {
        Self {
            constraints: iter.into_iter().collect(),
        }
    }
}

/// A group of constraints defining one scoring tier.
#[derive(Debug, Clone)]
pub struct Subtask {
    id: i32,
    constraints: Vec<Constraint>,
}

impl Subtask {
    pub fn new(id: i32, constraints: Vec<Constraint>) -> Self {
        Self { id, constraints }
    }

    /// Positive sequence number, or [`FLAT_SUBTASK_ID`].
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn is_flat(&self) -> bool {
        self.id == FLAT_SUBTASK_ID
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

/// All subtasks of a problem plus its multiple test cases constraints.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSuite {
    subtasks: Vec<Subtask>,
    multiple_test_cases: Vec<Constraint<usize>>,
}

impl ConstraintSuite {
    pub fn builder() -> ConstraintSuiteBuilder {
        ConstraintSuiteBuilder::default()
    }

    /// Either exactly one flat subtask, or subtasks `1..=n` in order.
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    pub fn multiple_test_cases_constraints(&self) -> &[Constraint<usize>] {
        &self.multiple_test_cases
    }

    /// Whether the author partitioned constraints into numbered subtasks.
    pub fn has_subtasks(&self) -> bool {
        self.subtasks.iter().any(|subtask| !subtask.is_flat())
    }

    /// Ids of every subtask, in order.
    pub fn subtask_ids(&self) -> Vec<i32> {
        self.subtasks.iter().map(Subtask::id).collect()
    }
}

/// Assembles a [`ConstraintSuite`] from declared blocks.
///
/// Subtask ids follow the order of [`subtask`](Self::subtask) calls, starting at 1.
#[derive(Debug, Default)]
pub struct ConstraintSuiteBuilder {
    flat: Option<ConstraintBlock>,
    subtasks: Vec<ConstraintBlock>,
    multiple_test_cases: Option<ConstraintBlock<usize>>,
}

impl ConstraintSuiteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the flat (ungrouped) constraints.
    #[must_use]
    pub fn constraints(mut self, block: ConstraintBlock) -> Self {
        match &mut self.flat {
            Some(existing) => existing.constraints.extend(block.constraints),
            None => self.flat = Some(block),
        }
        self
    }

    /// Declare the next subtask.
    #[must_use]
    pub fn subtask(mut self, block: ConstraintBlock) -> Self {
        self.subtasks.push(block);
        self
    }

    /// Declare constraints on the number of test cases in a file.
    #[must_use]
    pub fn multiple_test_cases_constraints(mut self, block: ConstraintBlock<usize>) -> Self {
        match &mut self.multiple_test_cases {
            Some(existing) => existing.constraints.extend(block.constraints),
            None => self.multiple_test_cases = Some(block),
        }
        self
    }

    pub fn build(self) -> Result<ConstraintSuite> {
        let subtasks = match (self.flat, self.subtasks.is_empty()) {
            (Some(_), false) => return Err(SpecError::ConstraintsAndSubtasks),
            (Some(flat), true) => vec![Subtask::new(FLAT_SUBTASK_ID, flat.into_constraints())],
            (None, true) => vec![Subtask::new(FLAT_SUBTASK_ID, Vec::new())],
            (None, false) => self
                .subtasks
                .into_iter()
                .zip(1..)
                .map(|(block, id)| Subtask::new(id, block.into_constraints()))
                .collect(),
        };
        Ok(ConstraintSuite {
            subtasks,
            multiple_test_cases: self
                .multiple_test_cases
                .map(ConstraintBlock::into_constraints)
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Variables;

    #[test]
    fn test_flat_constraints_become_subtask_minus_one() {
        let mut vars = Variables::new();
        let a = vars.scalar::<i64>("A").unwrap();
        let suite = ConstraintSuite::builder()
            .constraints(
                ConstraintBlock::new()
                    .with("1 <= A <= 100", move |d: &TestData| (1..=100).contains(&d[a]))
                    .with("A != 50", move |d: &TestData| d[a] != 50),
            )
            .build()
            .unwrap();
        assert_eq!(suite.subtask_ids(), vec![FLAT_SUBTASK_ID]);
        assert_eq!(suite.subtasks()[0].constraints().len(), 2);
        assert!(!suite.has_subtasks());
    }

    #[test]
    fn test_subtasks_are_numbered_in_order() {
        let suite = ConstraintSuite::builder()
            .subtask(ConstraintBlock::new().with("first", |_: &TestData| true))
            .subtask(ConstraintBlock::new())
            .subtask(ConstraintBlock::new().with("third", |_: &TestData| false))
            .build()
            .unwrap();
        assert_eq!(suite.subtask_ids(), vec![1, 2, 3]);
        assert!(suite.has_subtasks());
        assert_eq!(suite.subtasks()[2].constraints()[0].description(), "third");
    }

    #[test]
    fn test_nothing_declared_yields_empty_flat_subtask() {
        let suite = ConstraintSuite::builder().build().unwrap();
        assert_eq!(suite.subtask_ids(), vec![FLAT_SUBTASK_ID]);
        assert!(suite.subtasks()[0].constraints().is_empty());
    }

    #[test]
    fn test_flat_and_subtasks_conflict() {
        let err = ConstraintSuite::builder()
            .constraints(ConstraintBlock::new())
            .subtask(ConstraintBlock::new())
            .build()
            .unwrap_err();
        assert_eq!(err, SpecError::ConstraintsAndSubtasks);
    }

    #[test]
    fn test_multiple_test_cases_constraints_take_count() {
        let suite = ConstraintSuite::builder()
            .multiple_test_cases_constraints(
                ConstraintBlock::new().with("1 <= T <= 3", |t: &usize| (1..=3).contains(t)),
            )
            .build()
            .unwrap();
        let constraint = &suite.multiple_test_cases_constraints()[0];
        assert!(constraint.holds(&2));
        assert!(!constraint.holds(&4));
    }
}
