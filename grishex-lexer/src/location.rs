//! Position and location tracking
//!
//! This module defines the data structures for representing positions and locations in source
//! text, and the index that converts token offsets into line/column positions.
//!
//! ## Types
//!
//! - [`Position`] - A zero-based line:column position, column counted in characters
//! - [`Range`] - A source range with start/end positions and its byte span
//! - [`SourceLocation`] - Line index for offset-to-position conversion
//!
//! ## Key Design
//!
//! - **Character columns**: token offsets are character offsets, so are columns. Editor
//!   surfaces that count UTF-16 units convert at their own boundary.
//! - **Line terminators**: `\n`, `\r\n` and a lone `\r` all end a line.
//! - **Efficient conversion**: O(log n) binary search over line starts.

use crate::token::Token;
use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

/// A position in source text (line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A location in source text (start and end positions)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Range {
    pub span: ByteRange<usize>,
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(span: ByteRange<usize>, start: Position, end: Position) -> Self {
        Self { span, start, end }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Line index over a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
    /// Character offsets where each line starts
    line_char_starts: Vec<usize>,
    len_bytes: usize,
    len_chars: usize,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        let mut line_char_starts = vec![0];
        let mut chars = source.char_indices().enumerate().peekable();
        let mut len_chars = 0;

        while let Some((char_index, (byte_index, ch))) = chars.next() {
            len_chars = char_index + 1;
            let ends_line = match ch {
                '\n' => true,
                // `\r\n` ends the line at the `\n`
                '\r' => !matches!(chars.peek(), Some((_, (_, '\n')))),
                _ => false,
            };
            if ends_line {
                line_starts.push(byte_index + ch.len_utf8());
                line_char_starts.push(char_index + 1);
            }
        }

        Self {
            line_starts,
            line_char_starts,
            len_bytes: source.len(),
            len_chars,
        }
    }

    /// Number of lines; an empty source has one empty line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where a line starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Character offset where a line starts.
    pub fn line_char_start(&self, line: usize) -> Option<usize> {
        self.line_char_starts.get(line).copied()
    }

    /// Byte range of a line, including its terminator.
    pub fn line_span(&self, line: usize) -> Option<ByteRange<usize>> {
        let start = self.line_start(line)?;
        let end = self.line_start(line + 1).unwrap_or(self.len_bytes);
        Some(start..end)
    }

    /// Line containing a character offset. Offsets past the end land on the last line.
    pub fn line_of_char(&self, char_offset: usize) -> usize {
        match self.line_char_starts.binary_search(&char_offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    /// Convert a character offset to a line/column position
    pub fn position(&self, char_offset: usize) -> Position {
        let char_offset = char_offset.min(self.len_chars);
        let line = self.line_of_char(char_offset);
        Position::new(line, char_offset - self.line_char_starts[line])
    }

    /// Location of a token.
    pub fn token_range(&self, token: &Token) -> Range {
        Range::new(
            token.span.clone(),
            self.position(token.start),
            self.position(token.end),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_empty_source_has_one_line() {
        let location = SourceLocation::new("");
        assert_eq!(location.line_count(), 1);
        assert_eq!(location.position(0), Position::new(0, 0));
        assert_eq!(location.line_span(0), Some(0..0));
    }

    #[test]
    fn test_positions_across_lines() {
        let location = SourceLocation::new("ab\ncd\n\nef");
        assert_eq!(location.line_count(), 4);
        assert_eq!(location.position(0), Position::new(0, 0));
        assert_eq!(location.position(2), Position::new(0, 2));
        assert_eq!(location.position(3), Position::new(1, 0));
        assert_eq!(location.position(6), Position::new(2, 0));
        assert_eq!(location.position(8), Position::new(3, 1));
    }

    #[test]
    fn test_crlf_and_lone_cr() {
        let location = SourceLocation::new("a\r\nb\rc");
        assert_eq!(location.line_count(), 3);
        assert_eq!(location.line_start(1), Some(3));
        assert_eq!(location.line_start(2), Some(5));
        assert_eq!(location.position(1), Position::new(0, 1));
        assert_eq!(location.position(3), Position::new(1, 0));
        assert_eq!(location.position(5), Position::new(2, 0));
    }

    #[test]
    fn test_columns_count_characters() {
        let source = "\"héllo\" x";
        let location = SourceLocation::new(source);
        let token = Token::new(TokenKind::Identifier, "x", 8, 9..10);
        let range = location.token_range(&token);
        assert_eq!(range.start, Position::new(0, 8));
        assert_eq!(range.end, Position::new(0, 9));
        assert_eq!(&source[range.span], "x");
    }
}
