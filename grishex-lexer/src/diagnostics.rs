//! Diagnostics
//!
//! Lexical and structural problems are data, never failures. This module defines the
//! [`Diagnostic`] record shared by the structure tracker, the CLI and the language server, and
//! derives diagnostics from error tokens.
//!
//! ## Kinds
//!
//! Structural (reported by the structure tracker):
//! - unmatched closing bracket, unmatched opening bracket
//! - region marker never closed, end marker with no open region
//!
//! Lexical (derived from the token stream by [`lexical_diagnostics`]):
//! - unterminated string, invalid character, unrecognized operator run
//!
//! An unterminated block comment is not a problem and has no kind.

use crate::location::{Range, SourceLocation};
use crate::token::{Token, TokenKind};
use serde::Serialize;
use std::fmt;

/// Diagnostic severity levels matching the LSP protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
    Hint,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Information => write!(f, "info"),
            DiagnosticSeverity::Hint => write!(f, "hint"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    UnmatchedCloser,
    UnmatchedOpener,
    UnterminatedRegion,
    UnmatchedEndRegion,
    UnterminatedString,
    InvalidCharacter,
    UnrecognizedOperator,
}

impl DiagnosticKind {
    /// Stable code published to editors.
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::UnmatchedCloser => "unmatched-closer",
            DiagnosticKind::UnmatchedOpener => "unmatched-opener",
            DiagnosticKind::UnterminatedRegion => "unterminated-region",
            DiagnosticKind::UnmatchedEndRegion => "unmatched-endregion",
            DiagnosticKind::UnterminatedString => "unterminated-string",
            DiagnosticKind::InvalidCharacter => "invalid-character",
            DiagnosticKind::UnrecognizedOperator => "unrecognized-operator",
        }
    }

    pub fn severity(self) -> DiagnosticSeverity {
        match self {
            DiagnosticKind::UnterminatedRegion | DiagnosticKind::UnmatchedEndRegion => {
                DiagnosticSeverity::Warning
            }
            _ => DiagnosticSeverity::Error,
        }
    }

    /// Kinds produced by the structure tracker rather than the token stream.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            DiagnosticKind::UnmatchedCloser
                | DiagnosticKind::UnmatchedOpener
                | DiagnosticKind::UnterminatedRegion
                | DiagnosticKind::UnmatchedEndRegion
        )
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Structured diagnostic for tooling consumption
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub source: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, range: Range, message: impl Into<String>) -> Self {
        Self {
            range,
            severity: kind.severity(),
            kind,
            message: message.into(),
            source: "grishex".to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {} at {}",
            self.severity,
            self.kind.code(),
            self.message,
            self.range.start
        )
    }
}

/// Diagnostics for every error token, in stream order.
pub fn lexical_diagnostics(tokens: &[Token], location: &SourceLocation) -> Vec<Diagnostic> {
    tokens
        .iter()
        .filter_map(|token| {
            let (kind, message) = match token.kind {
                TokenKind::InvalidString => (
                    DiagnosticKind::UnterminatedString,
                    "string literal is not closed before the end of the line".to_string(),
                ),
                TokenKind::Invalid => (
                    DiagnosticKind::InvalidCharacter,
                    format!("unexpected character {:?}", token.lexeme),
                ),
                TokenKind::Unrecognized => (
                    DiagnosticKind::UnrecognizedOperator,
                    format!("`{}` is not an operator", token.lexeme),
                ),
                _ => return None,
            };
            Some(Diagnostic::new(kind, location.token_range(token), message))
        })
        .collect()
}

/// Orders diagnostics by start position, then by kind code for a stable output.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| {
        (a.range.start, a.range.end, a.kind.code()).cmp(&(b.range.start, b.range.end, b.kind.code()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::tokenize;
    use crate::location::Position;

    #[test]
    fn test_error_tokens_become_diagnostics() {
        let source = "a !!! b\nlet s = \"open\n#";
        let tokens = tokenize(source);
        let diagnostics = lexical_diagnostics(&tokens, &SourceLocation::new(source));

        let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::UnrecognizedOperator,
                DiagnosticKind::UnterminatedString,
                DiagnosticKind::InvalidCharacter,
            ]
        );
        assert_eq!(diagnostics[0].range.start, Position::new(0, 2));
        assert_eq!(diagnostics[1].range.start, Position::new(1, 8));
        assert_eq!(diagnostics[1].range.end, Position::new(1, 13));
        assert_eq!(diagnostics[2].range.start, Position::new(2, 0));
        assert!(diagnostics.iter().all(Diagnostic::is_error));
    }

    #[test]
    fn test_unterminated_block_comment_is_silent() {
        let source = "/* never closed";
        let tokens = tokenize(source);
        assert!(lexical_diagnostics(&tokens, &SourceLocation::new(source)).is_empty());
    }

    #[test]
    fn test_region_kinds_are_warnings() {
        assert_eq!(
            DiagnosticKind::UnterminatedRegion.severity(),
            DiagnosticSeverity::Warning
        );
        assert_eq!(
            DiagnosticKind::UnmatchedCloser.severity(),
            DiagnosticSeverity::Error
        );
        assert!(DiagnosticKind::UnmatchedEndRegion.is_structural());
        assert!(!DiagnosticKind::UnterminatedString.is_structural());
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::new(
            DiagnosticKind::UnmatchedCloser,
            Range::new(4..5, Position::new(0, 4), Position::new(0, 5)),
            "`}` has no matching opener",
        );
        assert_eq!(
            diagnostic.to_string(),
            "error[unmatched-closer]: `}` has no matching opener at 0:4"
        );
    }
}
