//! Verification report types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Indent level of a heading line.
pub const HEADING: usize = 0;
/// Indent level of a detail line under a heading.
pub const DETAIL: usize = 1;

/// One line of a verification report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Failure {
    pub message: String,
    /// 0 for a heading, 1 for a detail line.
    pub level: usize,
}

impl Failure {
    pub fn new(message: impl Into<String>, level: usize) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn heading(message: impl Into<String>) -> Self {
        Self::new(message, HEADING)
    }

    pub fn detail(message: impl Into<String>) -> Self {
        Self::new(message, DETAIL)
    }

    pub fn is_heading(&self) -> bool {
        self.level == HEADING
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.message, indent = self.level * 2)
    }
}

/// Ordered failures of one test case or one file.
///
/// An empty list means the case is OK.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub failures: Vec<Failure>,
}

impl VerificationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Number of heading lines, i.e. distinct problems found.
    pub fn heading_count(&self) -> usize {
        self.failures.iter().filter(|failure| failure.is_heading()).count()
    }

    pub fn push(&mut self, failure: Failure) {
        self.failures.push(failure);
    }
}

impl From<Vec<Failure>> for VerificationResult {
    fn from(failures: Vec<Failure>) -> Self {
        Self { failures }
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, failure) in self.failures.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}
