//! Lexer
//!
//!     Turns grishex source text into a flat, lossless stream of classified tokens.
//!
//! The Lexing Pipeline
//!
//!     1. Raw recognition with logos. See [raw]. There is one logos token set per lexical
//!        state; the Root set finds where each token class starts, the string and block
//!        comment sets consume bodies.
//!
//!     2. Scanning. See [scanner]. An explicit state machine over [LexState] that drives the
//!        raw lexers, assembles multi-piece tokens (strings, block comments) and tracks
//!        character offsets.
//!
//!     3. Classification. See [classifier]. Identifier candidates are checked against the
//!        reserved words, operator runs against the registered operators.
//!
//! Error Recovery
//!
//!     Lexing never fails. Problems become tokens: `InvalidString` for a string that hits the
//!     end of its line, `Unrecognized` for an operator run that is not an operator, and
//!     `Invalid` for a character no rule accepts. An unterminated block comment is simply a
//!     comment that runs to the end of input, since a user typing `/*` should not see the rest
//!     of the buffer light up as errors.

pub mod classifier;
pub(crate) mod raw;
pub mod scanner;

pub use classifier::{
    classify, is_keyword, is_operator, KEYWORDS, OPERATORS, VOCABULARY_VERSION,
};
pub use scanner::{LexState, Scanner};

use crate::token::Token;

/// Scans and classifies the whole input.
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source).collect()
}

/// Concatenates token lexemes back into source text.
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.lexeme.as_str()).collect()
}
