//! Error types for reading and writing test-case text.

use thiserror::Error;

use tcf_model::VariableKind;

use crate::grammar::TOKEN_PREVIEW_LEN;

/// Grammar failures raised while parsing or printing a test case.
///
/// Every failure is fatal to the test case being processed.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Input ended where a value was expected.
    #[error("Unexpected EOF for {context}")]
    UnexpectedEof { context: String },

    /// A value started with whitespace.
    #[error("Cannot parse for {context}. Found: <whitespace>")]
    LeadingWhitespace { context: String },

    /// A token does not convert to the variable's element type.
    #[error("Cannot parse for {context}. Found: '{found}'")]
    InvalidToken { context: String, found: String },

    /// Missing single space between two values.
    #[error("Expected: <space> after '{after}'")]
    MissingSpace { after: String },

    /// Missing line terminator.
    #[error("Expected: <newline>{}", after_suffix(.after))]
    MissingNewline { after: Option<String> },

    /// Trailing content after the declared format.
    #[error("Expected: <EOF>{}", after_suffix(.after))]
    MissingEof { after: Option<String> },

    /// A multiple test cases output prefix was not found.
    #[error("Expected: '{prefix}'")]
    MissingPrefix { prefix: String },

    /// Sequence length or table row count differs from the segment size.
    #[error("Number of elements of {shape} '{name}' unsatisfied. Expected: {expected}, actual: {actual}")]
    ElementCountMismatch {
        shape: &'static str,
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Grid table row count differs from the declared rows.
    #[error("Number of rows of matrix '{name}' unsatisfied. Expected: {expected}, actual: {actual}")]
    GridRowsMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A grid row length differs from the declared columns.
    #[error(
        "Number of columns of row {row} of matrix '{name}' unsatisfied. Expected: {expected}, actual: {actual}"
    )]
    GridColumnsMismatch {
        row: usize,
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A grid whose column rule evaluated to zero.
    #[error("Grid segment of '{name}' must have at least one column")]
    ZeroGridColumns { name: String },

    /// Requested output variant does not exist.
    #[error("output variant {index} does not exist ({count} declared)")]
    UnknownOutputVariant { index: usize, count: usize },

    /// Segment refers to a variable missing from the test data.
    #[error("unknown variable handle #{index}")]
    UnknownVariable { index: usize },

    /// Segment refers to a variable of another kind.
    #[error("variable '{name}' is not a {expected}")]
    KindMismatch { name: String, expected: VariableKind },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn after_suffix(after: &Option<String>) -> String {
    match after {
        Some(name) => format!(" after '{name}'"),
        None => String::new(),
    }
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    /// Create an UnexpectedEof error.
    pub fn unexpected_eof(context: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            context: context.into(),
        }
    }

    /// Create a LeadingWhitespace error.
    pub fn leading_whitespace(context: impl Into<String>) -> Self {
        Self::LeadingWhitespace {
            context: context.into(),
        }
    }

    /// Create an InvalidToken error, keeping a bounded preview of the token.
    pub fn invalid_token(context: impl Into<String>, token: &str) -> Self {
        Self::InvalidToken {
            context: context.into(),
            found: token.chars().take(TOKEN_PREVIEW_LEN).collect(),
        }
    }

    /// Create a MissingSpace error.
    pub fn missing_space(after: impl Into<String>) -> Self {
        Self::MissingSpace {
            after: after.into(),
        }
    }

    /// Create a MissingNewline error.
    pub fn missing_newline(after: Option<&str>) -> Self {
        Self::MissingNewline {
            after: after.map(str::to_owned),
        }
    }

    /// Create a MissingEof error.
    pub fn missing_eof(after: Option<&str>) -> Self {
        Self::MissingEof {
            after: after.map(str::to_owned),
        }
    }

    /// Create a MissingPrefix error.
    pub fn missing_prefix(prefix: impl Into<String>) -> Self {
        Self::MissingPrefix {
            prefix: prefix.into(),
        }
    }

    /// Create an ElementCountMismatch error for a sequence.
    pub fn vector_size(name: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ElementCountMismatch {
            shape: "vector",
            name: name.into(),
            expected,
            actual,
        }
    }

    /// Create an ElementCountMismatch error for a table inside a lines segment.
    pub fn jagged_vector_size(name: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ElementCountMismatch {
            shape: "jagged vector",
            name: name.into(),
            expected,
            actual,
        }
    }

    /// Whether this error is an I/O failure rather than a grammar failure.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
