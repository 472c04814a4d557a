//! Parse and print a whole test case.

use std::io::{Read, Write};

use tcf_model::{IoFormat, TestData};
use tracing::{debug, trace};

use crate::error::{CodecError, Result};
use crate::grammar::{TokenReader, TokenWriter};
use crate::layout::{parse_segments, print_segments};

/// Reads and writes test-case text for one [`IoFormat`].
///
/// Parsing stops at the first grammar failure. Values already stored in the
/// [`TestData`] are not rolled back, so callers discard the case on error.
#[derive(Debug, Clone, Copy)]
pub struct IoCodec<'f> {
    format: &'f IoFormat,
}

impl<'f> IoCodec<'f> {
    pub fn new(format: &'f IoFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &'f IoFormat {
        self.format
    }

    /// Print the input segments.
    pub fn print_input(&self, data: &TestData) -> Result<String> {
        let mut writer = TokenWriter::new();
        self.print_input_to(data, &mut writer)?;
        Ok(writer.into_string())
    }

    pub fn write_input<W: Write>(&self, data: &TestData, mut writer: W) -> Result<()> {
        let text = self.print_input(data)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Parse the whole text as input, requiring end of input afterwards.
    pub fn parse_input(&self, data: &mut TestData, text: &str) -> Result<()> {
        let mut reader = TokenReader::new(text);
        let mut last = None;
        self.parse_input_from(data, &mut reader, &mut last)?;
        reader.expect_eof(last.as_deref())?;
        debug!(
            segments = self.format.input().len(),
            bytes = text.len(),
            "parsed input"
        );
        Ok(())
    }

    pub fn read_input<R: Read>(&self, data: &mut TestData, mut reader: R) -> Result<()> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.parse_input(data, &text)
    }

    /// Print output variant `variant` (0-based).
    pub fn print_output(&self, data: &TestData, variant: usize) -> Result<String> {
        let mut writer = TokenWriter::new();
        self.print_output_to(data, variant, &mut writer)?;
        Ok(writer.into_string())
    }

    pub fn write_output<W: Write>(
        &self,
        data: &TestData,
        variant: usize,
        mut writer: W,
    ) -> Result<()> {
        let text = self.print_output(data, variant)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Parse the whole text as output.
    ///
    /// Each output variant is tried on a copy of `data`; the first that parses
    /// wins and is stored back. If every variant fails, the first variant's
    /// error is returned. Returns the matched variant, or `None` when the format
    /// declares no output (in which case only empty text is accepted).
    pub fn parse_output(&self, data: &mut TestData, text: &str) -> Result<Option<usize>> {
        let mut reader = TokenReader::new(text);
        let mut last = None;
        let matched = self.parse_output_from(data, &mut reader, &mut last)?;
        reader.expect_eof(last.as_deref())?;
        Ok(matched)
    }

    pub fn read_output<R: Read>(&self, data: &mut TestData, mut reader: R) -> Result<Option<usize>> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.parse_output(data, &text)
    }

    pub(crate) fn print_input_to(&self, data: &TestData, writer: &mut TokenWriter) -> Result<()> {
        print_segments(self.format.input(), data, writer)
    }

    pub(crate) fn print_output_to(
        &self,
        data: &TestData,
        variant: usize,
        writer: &mut TokenWriter,
    ) -> Result<()> {
        let outputs = self.format.outputs();
        let segments = outputs
            .get(variant)
            .ok_or(CodecError::UnknownOutputVariant {
                index: variant,
                count: outputs.len(),
            })?;
        print_segments(segments, data, writer)
    }

    pub(crate) fn parse_input_from(
        &self,
        data: &mut TestData,
        reader: &mut TokenReader<'_>,
        last: &mut Option<String>,
    ) -> Result<()> {
        parse_segments(self.format.input(), data, reader, last)
    }

    /// Parse one output at the cursor, leaving end-of-input checks to the caller.
    pub(crate) fn parse_output_from(
        &self,
        data: &mut TestData,
        reader: &mut TokenReader<'_>,
        last: &mut Option<String>,
    ) -> Result<Option<usize>> {
        let mut first_error = None;
        for (variant, segments) in self.format.outputs().iter().enumerate() {
            let mut candidate = data.clone();
            let mut cursor = reader.clone();
            let mut candidate_last = last.clone();
            match parse_segments(segments, &mut candidate, &mut cursor, &mut candidate_last) {
                Ok(()) => {
                    trace!(variant, "output variant matched");
                    *data = candidate;
                    *reader = cursor;
                    *last = candidate_last;
                    return Ok(Some(variant));
                }
                Err(err) => {
                    trace!(variant, error = %err, "output variant rejected");
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcf_model::{LineSegment, LinesSegment, Variables};

    #[test]
    fn test_output_variants_first_match_wins() {
        let mut vars = Variables::new();
        let a = vars.scalar::<i64>("A").unwrap();
        let s = vars.scalar::<String>("S").unwrap();
        let mut builder = IoFormat::builder();
        builder.input(LineSegment::new().with(a));
        builder.output(LineSegment::new().with(a));
        builder.output_variant();
        builder.output(LineSegment::new().with(s));
        let format = builder.build_for(&vars).unwrap();
        let codec = IoCodec::new(&format);

        let mut data = vars.instantiate();
        assert_eq!(codec.parse_output(&mut data, "17\n").unwrap(), Some(0));
        assert_eq!(data[a], 17);

        let mut data = vars.instantiate();
        assert_eq!(codec.parse_output(&mut data, "impossible\n").unwrap(), Some(1));
        assert_eq!(data[s], "impossible");
        assert_eq!(data[a], 0);
    }

    #[test]
    fn test_all_variants_failing_reports_first() {
        let mut vars = Variables::new();
        let a = vars.scalar::<i64>("A").unwrap();
        let v = vars.sequence::<i64>("V").unwrap();
        let mut builder = IoFormat::builder();
        builder.output(LineSegment::new().with(a));
        builder.output_variant();
        builder.output(LinesSegment::new().with_sequence(v).with_size(2));
        let format = builder.build_for(&vars).unwrap();
        let codec = IoCodec::new(&format);

        let mut data = vars.instantiate();
        let err = codec.parse_output(&mut data, "x\n").unwrap_err();
        assert_eq!(err.to_string(), "Cannot parse for A. Found: 'x'");
    }

    #[test]
    fn test_no_output_accepts_only_empty_text() {
        let mut vars = Variables::new();
        let a = vars.scalar::<i64>("A").unwrap();
        let mut builder = IoFormat::builder();
        builder.input(LineSegment::new().with(a));
        let format = builder.build_for(&vars).unwrap();
        let codec = IoCodec::new(&format);

        let mut data = vars.instantiate();
        assert_eq!(codec.parse_output(&mut data, "").unwrap(), None);
        assert_eq!(
            codec.parse_output(&mut data, "1\n").unwrap_err().to_string(),
            "Expected: <EOF>"
        );
        assert!(matches!(
            codec.print_output(&data, 0),
            Err(CodecError::UnknownOutputVariant { index: 0, count: 0 })
        ));
    }

    #[test]
    fn test_read_and_write_streams() {
        let mut vars = Variables::new();
        let a = vars.scalar::<u32>("A").unwrap();
        let mut builder = IoFormat::builder();
        builder.input(LineSegment::new().with(a));
        let format = builder.build_for(&vars).unwrap();
        let codec = IoCodec::new(&format);

        let mut data = vars.instantiate();
        codec.read_input(&mut data, "42\n".as_bytes()).unwrap();
        assert_eq!(data[a], 42);

        let mut out = Vec::new();
        codec.write_input(&data, &mut out).unwrap();
        assert_eq!(out, b"42\n");
    }
}
