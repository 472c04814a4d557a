//! Constraint and subtask verification.
//!
//! The [`Verifier`] evaluates every constraint of a problem against a parsed
//! test case and compares the subtasks the case actually satisfies with the
//! ones its author assigned it to. Problems are reported as an ordered list of
//! [`Failure`] lines rather than errors, so one run reports everything wrong
//! with a case.

mod report;
mod verifier;

pub use report::{DETAIL, Failure, HEADING, VerificationResult};
pub use verifier::Verifier;
