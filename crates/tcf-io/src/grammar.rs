//! Whitespace and end-of-input grammar.
//!
//! Tokens are separated by exactly one space, lines end with exactly one `\n`,
//! and no value may start with whitespace. Each primitive names the slot it was
//! looking at so failures read like `Expected: <space> after 'V[1]'`.

use crate::error::{CodecError, Result};

/// Maximum number of characters of an offending token quoted in a parse failure.
pub const TOKEN_PREVIEW_LEN: usize = 20;

/// Cursor over test-case text.
///
/// Cloning is cheap and yields an independent cursor, which is how callers try
/// alternatives (e.g. output variants) without consuming input.
#[derive(Debug, Clone)]
pub struct TokenReader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TokenReader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Whether the next character is `\n`. Does not consume.
    pub fn can_peek_newline(&self) -> bool {
        self.peek() == Some('\n')
    }

    pub fn ensure_no_eof(&self, context: &str) -> Result<()> {
        if self.is_eof() {
            return Err(CodecError::unexpected_eof(context));
        }
        Ok(())
    }

    pub fn ensure_no_leading_whitespace(&self, context: &str) -> Result<()> {
        if self.peek().is_some_and(char::is_whitespace) {
            return Err(CodecError::leading_whitespace(context));
        }
        Ok(())
    }

    /// Read the next whitespace-delimited token for `context`.
    pub fn read_token(&mut self, context: &str) -> Result<&'a str> {
        self.ensure_no_eof(context)?;
        self.ensure_no_leading_whitespace(context)?;
        let rest = self.rest();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.pos += end;
        Ok(&rest[..end])
    }

    /// Read the rest of the current line verbatim, leaving the `\n` unconsumed.
    ///
    /// A trailing `\r` is dropped. At end of input the line is empty.
    pub fn read_line(&mut self) -> &'a str {
        let rest = self.rest();
        let end = rest.find('\n').unwrap_or(rest.len());
        self.pos += end;
        let line = &rest[..end];
        line.strip_suffix('\r').unwrap_or(line)
    }

    /// Consume exactly one space following the slot named `after`.
    pub fn expect_single_space(&mut self, after: &str) -> Result<()> {
        if self.peek() != Some(' ') {
            return Err(CodecError::missing_space(after));
        }
        self.pos += 1;
        Ok(())
    }

    /// Consume exactly one `\n`.
    pub fn expect_newline(&mut self, after: Option<&str>) -> Result<()> {
        if !self.can_peek_newline() {
            return Err(CodecError::missing_newline(after));
        }
        self.pos += 1;
        Ok(())
    }

    /// Consume `literal` exactly.
    pub fn expect_literal(&mut self, literal: &str) -> Result<()> {
        if !self.rest().starts_with(literal) {
            return Err(CodecError::missing_prefix(literal));
        }
        self.pos += literal.len();
        Ok(())
    }

    /// Fail unless all input has been consumed.
    pub fn expect_eof(&self, last: Option<&str>) -> Result<()> {
        if !self.is_eof() {
            return Err(CodecError::missing_eof(last));
        }
        Ok(())
    }
}

/// Output buffer following the same grammar as [`TokenReader`].
#[derive(Debug, Default)]
pub struct TokenWriter {
    out: String,
}

impl TokenWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn space(&mut self) {
        self.out.push(' ');
    }

    pub fn newline(&mut self) {
        self.out.push('\n');
    }

    /// Append text as-is.
    pub fn text(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Buffer that cells print their values into.
    pub fn buffer(&mut self) -> &mut String {
        &mut self.out
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }
}
