//! Errors raised while declaring a problem specification.

use thiserror::Error;

/// Errors that can occur while building variables, IO formats or constraint suites.
///
/// These are raised once, before any test case exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// Variable name is empty.
    #[error("variable name must not be empty")]
    EmptyVariableName,

    /// Variable declared twice.
    #[error("duplicate variable name: {name}")]
    DuplicateVariable { name: String },

    /// A size-less lines segment followed by another segment.
    #[error("Lines segment without size can only be the last segment")]
    UnsizedLinesNotLast,

    /// A size-less raw lines segment followed by another segment.
    #[error("Raw lines segment without size can only be the last segment")]
    UnsizedRawLinesNotLast,

    /// Lines segment declared with no sequences or tables.
    #[error("Lines segment must have at least one variable")]
    EmptyLinesSegment,

    /// A table inside a lines segment followed by another variable.
    #[error("Jagged vector can only be the last variable in a lines segment")]
    JaggedVectorNotLast,

    /// Grid declared with a fixed column count of zero.
    #[error("Grid segment of '{name}' must have at least one column")]
    ZeroGridColumns { name: String },

    /// Both flat constraints and subtasks were declared.
    #[error("Constraints and subtasks cannot be declared together")]
    ConstraintsAndSubtasks,

    /// Multiple test cases constraints without a multiple test cases config.
    #[error("Multiple test cases constraints require a multiple test cases config")]
    MultipleTestCasesConstraintsWithoutConfig,

    /// A handle that does not belong to the registry used to build the format.
    #[error("unknown variable handle #{index}")]
    UnknownVariable { index: usize },
}

/// Result type alias for specification building.
pub type Result<T> = std::result::Result<T, SpecError>;

impl SpecError {
    /// Create a DuplicateVariable error.
    pub fn duplicate_variable(name: impl Into<String>) -> Self {
        Self::DuplicateVariable { name: name.into() }
    }

    /// Create a ZeroGridColumns error.
    pub fn zero_grid_columns(name: impl Into<String>) -> Self {
        Self::ZeroGridColumns { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            SpecError::UnsizedLinesNotLast.to_string(),
            "Lines segment without size can only be the last segment"
        );
        assert_eq!(
            SpecError::UnsizedRawLinesNotLast.to_string(),
            "Raw lines segment without size can only be the last segment"
        );
        assert_eq!(
            SpecError::duplicate_variable("A").to_string(),
            "duplicate variable name: A"
        );
        assert_eq!(
            SpecError::zero_grid_columns("M").to_string(),
            "Grid segment of 'M' must have at least one column"
        );
    }
}
