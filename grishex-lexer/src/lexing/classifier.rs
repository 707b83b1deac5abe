//! Classifier
//!
//!     Decides the final kind of identifier-like and symbol-like candidates produced by the
//!     scanner. The scanner has already consumed the maximal run; the classifier never splits
//!     or extends it, it only answers whether the exact lexeme is reserved.
//!
//!     Both tables below are part of the language surface. Any change to either one must bump
//!     [VOCABULARY_VERSION].

use crate::token::TokenKind;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Version of the keyword and operator tables.
pub const VOCABULARY_VERSION: u32 = 1;

/// Reserved words. Matching is case-sensitive.
pub const KEYWORDS: &[&str] = &[
    "contract",
    "state",
    "function",
    "view",
    "constructor",
    "returns",
    "internal",
    "event",
    "struct",
    "enum",
    "let",
    "require",
    "assert",
    "revert",
    "emit",
    "self",
    "true",
    "false",
    "if",
    "else",
    "for",
    "while",
    "foreach",
    "in",
    "try",
    "catch",
];

/// Registered operator lexemes.
pub const OPERATORS: &[&str] = &[
    "=", ">", "<", "!", "~", "?", ":", "==", "<=", ">=", "!=", "&&", "||", "++", "--", "+", "-",
    "*", "/", "&", "|", "^", "%", "<<", ">>", ">>>", "+=", "-=", "*=", "/=", "&=", "|=", "^=",
    "%=", "<<=", ">>=", ">>>=",
];

static KEYWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| KEYWORDS.iter().copied().collect());

static OPERATOR_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| OPERATORS.iter().copied().collect());

pub fn is_keyword(lexeme: &str) -> bool {
    KEYWORD_SET.contains(lexeme)
}

pub fn is_operator(lexeme: &str) -> bool {
    OPERATOR_SET.contains(lexeme)
}

/// Characters that may appear in an operator run.
pub fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '=' | '>' | '<' | '!' | '~' | '?' | ':' | '&' | '|' | '+' | '-' | '*' | '/' | '^' | '%'
    )
}

/// Final classification of a scanner candidate.
///
/// `Identifier` candidates become `Keyword` when reserved, `Operator` candidates become
/// `Unrecognized` unless the whole run is a registered operator. Every other kind passes
/// through untouched.
pub fn classify(lexeme: &str, candidate: TokenKind) -> TokenKind {
    match candidate {
        TokenKind::Identifier if is_keyword(lexeme) => TokenKind::Keyword,
        TokenKind::Operator if !is_operator(lexeme) => TokenKind::Unrecognized,
        other => other,
    }
}
