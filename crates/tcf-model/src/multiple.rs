//! Layout options for files holding several test cases.

use serde::{Deserialize, Serialize};

/// Placeholder in [`MultipleTestCasesConfig::output_prefix`] replaced by the 1-based case index.
pub const CASE_INDEX_PLACEHOLDER: &str = "%d";

/// How several test cases share one input file and one output file.
///
/// The input starts with a line holding the case count `T`. Each case output may
/// be preceded by a prefix such as `"Case #%d: "`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleTestCasesConfig {
    pub output_prefix: Option<String>,
    pub empty_line_before_inputs: bool,
    pub empty_line_between_outputs: bool,
}

impl MultipleTestCasesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_empty_line_before_inputs(mut self, enabled: bool) -> Self {
        self.empty_line_before_inputs = enabled;
        self
    }

    #[must_use]
    pub fn with_empty_line_between_outputs(mut self, enabled: bool) -> Self {
        self.empty_line_between_outputs = enabled;
        self
    }

    /// The output prefix for case `index` (1-based), or `None` when no prefix is configured.
    pub fn prefix_for(&self, index: usize) -> Option<String> {
        self.output_prefix
            .as_ref()
            .map(|prefix| prefix.replace(CASE_INDEX_PLACEHOLDER, &index.to_string()))
    }
}
