//! Files holding several test cases.
//!
//! Input layout:
//!
//! ```text
//! T
//! [empty line]   (when empty_line_before_inputs)
//! <case 1 input>
//! [empty line]
//! <case 2 input>
//! ...
//! ```
//!
//! Each case output may be preceded by the configured prefix (with `%d` replaced
//! by the 1-based case index) and separated from the previous one by an empty line.

use std::io::{Read, Write};

use tcf_model::{IoFormat, MultipleTestCasesConfig, Primitive, TestData, Variables};
use tracing::debug;

use crate::codec::IoCodec;
use crate::error::{CodecError, Result};
use crate::grammar::{TokenReader, TokenWriter};

/// Display name of the case count.
pub const CASE_COUNT_NAME: &str = "T";

/// Reads and writes combined multiple-test-cases files.
#[derive(Debug, Clone, Copy)]
pub struct MultipleTestCasesCodec<'f> {
    codec: IoCodec<'f>,
    variables: &'f Variables,
    config: &'f MultipleTestCasesConfig,
}

impl<'f> MultipleTestCasesCodec<'f> {
    pub fn new(
        format: &'f IoFormat,
        variables: &'f Variables,
        config: &'f MultipleTestCasesConfig,
    ) -> Self {
        Self {
            codec: IoCodec::new(format),
            variables,
            config,
        }
    }

    pub fn config(&self) -> &'f MultipleTestCasesConfig {
        self.config
    }

    /// Print the combined input of `cases`.
    pub fn print_input(&self, cases: &[TestData]) -> Result<String> {
        let mut writer = TokenWriter::new();
        writer.text(&cases.len().to_string());
        writer.newline();
        for data in cases {
            if self.config.empty_line_before_inputs {
                writer.newline();
            }
            self.codec.print_input_to(data, &mut writer)?;
        }
        Ok(writer.into_string())
    }

    pub fn write_input<W: Write>(&self, cases: &[TestData], mut writer: W) -> Result<()> {
        let text = self.print_input(cases)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Parse a combined input into one [`TestData`] per case.
    pub fn parse_input(&self, text: &str) -> Result<Vec<TestData>> {
        let mut reader = TokenReader::new(text);
        let token = reader.read_token(CASE_COUNT_NAME)?;
        let count = usize::parse_token(token)
            .ok_or_else(|| CodecError::invalid_token(CASE_COUNT_NAME, token))?;
        let mut last = Some(CASE_COUNT_NAME.to_owned());
        reader.expect_newline(last.as_deref())?;

        let mut cases = Vec::new();
        for _ in 0..count {
            if self.config.empty_line_before_inputs {
                reader.expect_newline(last.as_deref())?;
            }
            let mut data = self.variables.instantiate();
            self.codec.parse_input_from(&mut data, &mut reader, &mut last)?;
            cases.push(data);
        }
        reader.expect_eof(last.as_deref())?;
        debug!(cases = count, bytes = text.len(), "parsed multiple test cases input");
        Ok(cases)
    }

    pub fn read_input<R: Read>(&self, mut reader: R) -> Result<Vec<TestData>> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.parse_input(&text)
    }

    /// Print the combined output of `cases` using output variant `variant`.
    pub fn print_output(&self, cases: &[TestData], variant: usize) -> Result<String> {
        let mut writer = TokenWriter::new();
        for (index, data) in cases.iter().enumerate() {
            if index > 0 && self.config.empty_line_between_outputs {
                writer.newline();
            }
            if let Some(prefix) = self.config.prefix_for(index + 1) {
                writer.text(&prefix);
            }
            self.codec.print_output_to(data, variant, &mut writer)?;
        }
        Ok(writer.into_string())
    }

    /// Parse a combined output into `cases`, one output per case, in order.
    pub fn parse_output(&self, cases: &mut [TestData], text: &str) -> Result<()> {
        let mut reader = TokenReader::new(text);
        let mut last = None;
        for (index, data) in cases.iter_mut().enumerate() {
            if index > 0 && self.config.empty_line_between_outputs {
                reader.expect_newline(last.as_deref())?;
            }
            if let Some(prefix) = self.config.prefix_for(index + 1) {
                reader.expect_literal(&prefix)?;
            }
            self.codec.parse_output_from(data, &mut reader, &mut last)?;
        }
        reader.expect_eof(last.as_deref())?;
        debug!(cases = cases.len(), "parsed multiple test cases output");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcf_model::{LineSegment, Scalar};

    fn sum_format(vars: &mut Variables) -> (IoFormat, Scalar<i32>, Scalar<i32>, Scalar<i32>) {
        let a = vars.scalar::<i32>("A").unwrap();
        let b = vars.scalar::<i32>("B").unwrap();
        let sum = vars.scalar::<i32>("SUM").unwrap();
        let mut builder = IoFormat::builder();
        builder.input(LineSegment::new().with(a).with(b));
        builder.output(LineSegment::new().with(sum));
        (builder.build_for(vars).unwrap(), a, b, sum)
    }

    #[test]
    fn test_combined_input_with_blank_lines() {
        let mut vars = Variables::new();
        let (format, a, b, _) = sum_format(&mut vars);
        let config = MultipleTestCasesConfig::new().with_empty_line_before_inputs(true);
        let codec = MultipleTestCasesCodec::new(&format, &vars, &config);

        let mut first = vars.instantiate();
        first[a] = 1;
        first[b] = 2;
        let mut second = vars.instantiate();
        second[a] = 3;
        second[b] = 4;
        let text = codec.print_input(&[first, second]).unwrap();
        assert_eq!(text, "2\n\n1 2\n\n3 4\n");

        let cases = codec.parse_input(&text).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!((cases[1][a], cases[1][b]), (3, 4));
    }

    #[test]
    fn test_count_must_be_a_number() {
        let mut vars = Variables::new();
        let (format, ..) = sum_format(&mut vars);
        let config = MultipleTestCasesConfig::new();
        let codec = MultipleTestCasesCodec::new(&format, &vars, &config);
        assert_eq!(
            codec.parse_input("two\n1 2\n").unwrap_err().to_string(),
            "Cannot parse for T. Found: 'two'"
        );
        assert_eq!(
            codec.parse_input("1\n1 2\n3 4\n").unwrap_err().to_string(),
            "Expected: <EOF> after 'B'"
        );
    }

    #[test]
    fn test_huge_count_fails_on_missing_case() {
        let mut vars = Variables::new();
        let (format, ..) = sum_format(&mut vars);
        let config = MultipleTestCasesConfig::new();
        let codec = MultipleTestCasesCodec::new(&format, &vars, &config);
        assert_eq!(
            codec
                .parse_input("18446744073709551615\n")
                .unwrap_err()
                .to_string(),
            "Unexpected EOF for A"
        );
        assert_eq!(
            codec.parse_input("1000000000000\n1 2\n").unwrap_err().to_string(),
            "Unexpected EOF for A"
        );
    }

    #[test]
    fn test_prefixed_outputs() {
        let mut vars = Variables::new();
        let (format, _, _, sum) = sum_format(&mut vars);
        let config = MultipleTestCasesConfig::new()
            .with_output_prefix("Case #%d: ")
            .with_empty_line_between_outputs(true);
        let codec = MultipleTestCasesCodec::new(&format, &vars, &config);

        let mut cases = vec![vars.instantiate(), vars.instantiate()];
        cases[0][sum] = 3;
        cases[1][sum] = 7;
        let text = codec.print_output(&cases, 0).unwrap();
        assert_eq!(text, "Case #1: 3\n\nCase #2: 7\n");

        let mut parsed = vec![vars.instantiate(), vars.instantiate()];
        codec.parse_output(&mut parsed, &text).unwrap();
        assert_eq!(parsed[1][sum], 7);

        let err = codec
            .parse_output(&mut parsed, "Case #1: 3\n\nCase 2: 7\n")
            .unwrap_err();
        assert_eq!(err.to_string(), "Expected: 'Case #2: '");
    }
}
