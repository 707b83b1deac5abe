//! Token definitions for the grishex language
//!
//!     A token is the minimal classified unit of source text. The kind vocabulary is closed and
//!     shared with every consumer (highlighters, the CLI, the language server), so adding or
//!     renaming a kind is a breaking change.
//!
//!     Tokens are immutable once the scanner produces them. Each one carries its text plus two
//!     views of its position: character offsets (`start`/`end`), which is what editor surfaces
//!     speak, and the equivalent byte range (`span`) for slicing the source `&str`.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    NumberFloat,
    String,
    /// A string literal that hit a line terminator or the end of input before its closing quote.
    InvalidString,
    Comment,
    Bracket,
    Operator,
    /// A maximal run of operator symbols that is not a registered operator.
    Unrecognized,
    /// A single character that starts no recognized token class.
    Invalid,
    Whitespace,
}

/// Every token kind, in declaration order.
pub const TOKEN_KINDS: &[TokenKind] = &[
    TokenKind::Keyword,
    TokenKind::Identifier,
    TokenKind::Number,
    TokenKind::NumberFloat,
    TokenKind::String,
    TokenKind::InvalidString,
    TokenKind::Comment,
    TokenKind::Bracket,
    TokenKind::Operator,
    TokenKind::Unrecognized,
    TokenKind::Invalid,
    TokenKind::Whitespace,
];

impl TokenKind {
    /// The vocabulary name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Keyword => "Keyword",
            TokenKind::Identifier => "Identifier",
            TokenKind::Number => "Number",
            TokenKind::NumberFloat => "NumberFloat",
            TokenKind::String => "String",
            TokenKind::InvalidString => "InvalidString",
            TokenKind::Comment => "Comment",
            TokenKind::Bracket => "Bracket",
            TokenKind::Operator => "Operator",
            TokenKind::Unrecognized => "Unrecognized",
            TokenKind::Invalid => "Invalid",
            TokenKind::Whitespace => "Whitespace",
        }
    }

    /// Editor theme scope for this kind. Unrecognized symbol runs map to the empty scope and
    /// render as plain text.
    pub fn scope(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::NumberFloat => "number.float",
            TokenKind::String => "string",
            TokenKind::InvalidString => "string.invalid",
            TokenKind::Comment => "comment",
            TokenKind::Bracket => "delimiter.bracket",
            TokenKind::Operator => "operator",
            TokenKind::Unrecognized => "",
            TokenKind::Invalid => "invalid",
            TokenKind::Whitespace => "white",
        }
    }

    /// Kinds that signal a lexical error.
    pub fn is_error(self) -> bool {
        matches!(
            self,
            TokenKind::InvalidString | TokenKind::Unrecognized | TokenKind::Invalid
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified slice of the source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// Character offset of the first character.
    pub start: usize,
    /// Character offset one past the last character.
    pub end: usize,
    /// Byte range of the lexeme in the source.
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, start: usize, span: Range<usize>) -> Self {
        let lexeme = lexeme.into();
        let end = start + lexeme.chars().count();
        Self {
            kind,
            lexeme,
            start,
            end,
            span,
        }
    }

    /// True for a `{`, `[` or `(` bracket token.
    pub fn is_opening_bracket(&self) -> bool {
        self.kind == TokenKind::Bracket && matches!(self.lexeme.as_str(), "{" | "[" | "(")
    }

    /// True for a `}`, `]` or `)` bracket token.
    pub fn is_closing_bracket(&self) -> bool {
        self.kind == TokenKind::Bracket && matches!(self.lexeme.as_str(), "}" | "]" | ")")
    }

    /// True for a `//` comment (as opposed to a `/* */` block comment).
    pub fn is_line_comment(&self) -> bool {
        self.kind == TokenKind::Comment && self.lexeme.starts_with("//")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})@{}..{}", self.kind, self.lexeme, self.start, self.end)
    }
}
