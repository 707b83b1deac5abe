//! Bracket matching
//!
//!     Stack-based pairing of `{}`, `[]` and `()`. Only `Bracket` tokens take part, so brackets
//!     inside strings and comments never disturb the nesting.
//!
//!     A closer pairs with the opener on top of the stack only when their characters
//!     correspond. Otherwise the closer is unmatched and the stack is left alone: `{ ) }` pairs
//!     the braces and reports the parenthesis, it never closes the brace early.

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::location::SourceLocation;
use crate::token::Token;
use serde::Serialize;

/// One nesting level. `close` is `None` for an opener still open at the end of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketPair {
    pub open: Token,
    pub close: Option<Token>,
    /// Number of enclosing open brackets when this one opened.
    pub depth: usize,
}

impl BracketPair {
    pub fn is_matched(&self) -> bool {
        self.close.is_some()
    }
}

/// Result of matching a token stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BracketMatches {
    /// Every opener in source order, paired or not.
    pub pairs: Vec<BracketPair>,
    pub unmatched_closers: Vec<Token>,
    /// For each unmatched closer, the index in `pairs` of the innermost bracket open when it
    /// was rejected.
    #[serde(skip)]
    enclosing: Vec<Option<usize>>,
}

impl BracketMatches {
    pub fn unmatched_openers(&self) -> impl Iterator<Item = &BracketPair> {
        self.pairs.iter().filter(|pair| !pair.is_matched())
    }

    pub fn is_balanced(&self) -> bool {
        self.unmatched_closers.is_empty() && self.pairs.iter().all(BracketPair::is_matched)
    }
}

/// The closer corresponding to an opener.
pub fn closing_for(open: &str) -> Option<&'static str> {
    match open {
        "{" => Some("}"),
        "[" => Some("]"),
        "(" => Some(")"),
        _ => None,
    }
}

pub fn match_brackets(tokens: &[Token]) -> BracketMatches {
    let mut matches = BracketMatches::default();
    // Indices into `matches.pairs` of the currently open brackets
    let mut stack: Vec<usize> = Vec::new();

    for token in tokens {
        if token.is_opening_bracket() {
            stack.push(matches.pairs.len());
            matches.pairs.push(BracketPair {
                open: token.clone(),
                close: None,
                depth: stack.len() - 1,
            });
        } else if token.is_closing_bracket() {
            let top = stack.last().copied();
            match top {
                Some(index)
                    if closing_for(&matches.pairs[index].open.lexeme)
                        == Some(token.lexeme.as_str()) =>
                {
                    matches.pairs[index].close = Some(token.clone());
                    stack.pop();
                }
                _ => {
                    matches.unmatched_closers.push(token.clone());
                    matches.enclosing.push(top);
                }
            }
        }
    }

    matches
}

/// Diagnostics for unmatched closers and openers, in source order.
pub fn bracket_diagnostics(matches: &BracketMatches, location: &SourceLocation) -> Vec<Diagnostic> {
    let closers = matches
        .unmatched_closers
        .iter()
        .zip(&matches.enclosing)
        .map(|(closer, &enclosing)| {
            let message = match enclosing.and_then(|index| matches.pairs.get(index)) {
                Some(pair) => format!(
                    "`{}` does not close `{}` opened at {}",
                    closer.lexeme,
                    pair.open.lexeme,
                    location.position(pair.open.start)
                ),
                None => format!("`{}` has no matching opener", closer.lexeme),
            };
            (
                closer.start,
                Diagnostic::new(
                    DiagnosticKind::UnmatchedCloser,
                    location.token_range(closer),
                    message,
                ),
            )
        });

    let openers = matches.unmatched_openers().map(|pair| {
        (
            pair.open.start,
            Diagnostic::new(
                DiagnosticKind::UnmatchedOpener,
                location.token_range(&pair.open),
                format!("`{}` is never closed", pair.open.lexeme),
            ),
        )
    });

    let mut ordered: Vec<_> = closers.chain(openers).collect();
    ordered.sort_by_key(|(start, _)| *start);
    ordered.into_iter().map(|(_, diagnostic)| diagnostic).collect()
}
