use std::path::PathBuf;

use serde::Serialize;
use tcf_model::SegmentKind;
use tcf_verify::VerificationResult;

/// Outcome of `validate` over every requested file.
#[derive(Debug, Serialize)]
pub struct ValidationRun {
    pub declared_subtasks: Vec<i32>,
    pub files: Vec<FileReport>,
    pub has_errors: bool,
}

impl ValidationRun {
    pub fn new(declared_subtasks: Vec<i32>, files: Vec<FileReport>) -> Self {
        let has_errors = files.iter().any(|file| !file.is_ok());
        Self {
            declared_subtasks,
            files,
            has_errors,
        }
    }

    pub fn failed_count(&self) -> usize {
        self.files.iter().filter(|file| !file.is_ok()).count()
    }
}

/// One validated input file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// Read or parse failure; no constraints were checked when set.
    pub error: Option<String>,
    /// Multiple test cases constraints, checked once per file.
    pub count_result: VerificationResult,
    pub cases: Vec<CaseReport>,
}

impl FileReport {
    pub fn failed(path: PathBuf, error: impl Into<String>) -> Self {
        Self {
            path,
            error: Some(error.into()),
            count_result: VerificationResult::new(),
            cases: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
            && self.count_result.is_ok()
            && self.cases.iter().all(|case| case.result.is_ok())
    }

    /// Number of failure headings across the file.
    pub fn failure_count(&self) -> usize {
        usize::from(self.error.is_some())
            + self.count_result.heading_count()
            + self
                .cases
                .iter()
                .map(|case| case.result.heading_count())
                .sum::<usize>()
    }
}

/// Verification of one test case inside a file.
#[derive(Debug, Serialize)]
pub struct CaseReport {
    /// 1-based position in the file.
    pub index: usize,
    pub result: VerificationResult,
}

/// Outcome of `check-output`.
#[derive(Debug, Serialize)]
pub struct OutputCheck {
    pub path: PathBuf,
    pub cases: usize,
    /// Matched output variant (0-based); `None` when the problem declares no output.
    pub variant: Option<usize>,
}

/// One row of the `format` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatRow {
    /// `input` or `output #k` (1-based).
    pub section: String,
    pub kind: SegmentKind,
    pub variables: Vec<String>,
    pub size: String,
}
