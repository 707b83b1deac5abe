//! Raw logos tokens
//!
//!     One logos token set per lexical state. The Root set recognizes where every token class
//!     begins and consumes the simple classes outright; the block comment and string sets are
//!     run over the remaining input once the scanner has switched into that state.
//!
//!     Root-level patterns never overlap: every multi-character class that
//!     needs lookahead (numeric tails, operator runs) matches its first character with a regex
//!     and finishes in a callback, so logos never has to choose between two equal-length
//!     matches.

use crate::lexing::classifier::is_operator_char;
use logos::{Lexer, Logos};

/// Shape of a numeric literal, decided while consuming it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberShape {
    Integer,
    Float,
}

/// Token classes recognized in the Root state.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RootToken {
    #[regex(r"\s+")]
    Whitespace,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Word,

    #[regex(r"[0-9]+", integer_tail)]
    #[regex(r"\.[0-9]+", fraction_tail)]
    Number(NumberShape),

    #[token("\"")]
    DoubleQuote,

    #[token("'")]
    SingleQuote,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[token("/*")]
    BlockCommentStart,

    #[regex(r"[{}()\[\]]")]
    Bracket,

    #[regex(r"[=><!~?:&|+\-*/^%]", operator_run)]
    OperatorRun,
}

fn digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of an exponent suffix (`e`, optional sign, at least one digit), or 0.
fn exponent_len(bytes: &[u8]) -> usize {
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return 0;
    }
    let sign = usize::from(matches!(bytes.get(1), Some(b'+' | b'-')));
    match digits(&bytes[1 + sign..]) {
        0 => 0,
        n => 1 + sign + n,
    }
}

fn integer_tail(lex: &mut Lexer<RootToken>) -> NumberShape {
    let rest = lex.remainder().as_bytes();
    let mut len = 0;
    let mut shape = NumberShape::Integer;

    if rest.first() == Some(&b'.') && rest.get(1).is_some_and(u8::is_ascii_digit) {
        len = 1 + digits(&rest[1..]);
        shape = NumberShape::Float;
    }

    let exponent = exponent_len(&rest[len..]);
    if exponent > 0 {
        len += exponent;
        shape = NumberShape::Float;
    }

    lex.bump(len);
    shape
}

fn fraction_tail(lex: &mut Lexer<RootToken>) -> NumberShape {
    let exponent = exponent_len(lex.remainder().as_bytes());
    lex.bump(exponent);
    NumberShape::Float
}

/// Extends a single operator character into the maximal run.
///
/// The run stops in front of a `/` that opens a comment, so `a +// note` keeps its comment.
fn operator_run(lex: &mut Lexer<RootToken>) {
    let rest = lex.remainder().as_bytes();
    let mut len = 0;
    while let Some(&byte) = rest.get(len) {
        if !is_operator_char(byte as char) {
            break;
        }
        if byte == b'/' && matches!(rest.get(len + 1), Some(b'/' | b'*')) {
            break;
        }
        len += 1;
    }
    lex.bump(len);
}

/// Pieces of a block comment body, after the opening `/*`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockCommentPiece {
    #[token("*/")]
    Close,

    #[regex(r"[^*]+")]
    Text,

    #[token("*")]
    Star,
}

/// Pieces of a string body after an opening `"`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DoubleQuotedPiece {
    #[token("\"")]
    Close,

    #[regex(r#"[^"\\\r\n]+"#)]
    Text,

    #[token("\\", escaped_char)]
    Escape,
}

/// Pieces of a string body after an opening `'`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SingleQuotedPiece {
    #[token("'")]
    Close,

    #[regex(r"[^'\\\r\n]+")]
    Text,

    #[token("\\", escaped_char)]
    Escape,
}

/// A backslash always takes the next character with it, line terminators included. A `\r\n`
/// pair is one terminator.
fn escaped_char<'s, P>(lex: &mut Lexer<'s, P>)
where
    P: Logos<'s, Source = str>,
{
    let rest = lex.remainder();
    if rest.starts_with("\r\n") {
        lex.bump(2);
    } else if let Some(next) = rest.chars().next() {
        lex.bump(next.len_utf8());
    }
}

pub(crate) trait QuotedPiece {
    fn is_close(&self) -> bool;
}

impl QuotedPiece for DoubleQuotedPiece {
    fn is_close(&self) -> bool {
        matches!(self, DoubleQuotedPiece::Close)
    }
}

impl QuotedPiece for SingleQuotedPiece {
    fn is_close(&self) -> bool {
        matches!(self, SingleQuotedPiece::Close)
    }
}

/// Where a multi-character construct stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BodyEnd {
    /// Bytes consumed, including the closing delimiter when present.
    pub len: usize,
    pub closed: bool,
}

/// Consumes a block comment body up to and including `*/`, or to the end of input.
pub(crate) fn block_comment_body(rest: &str) -> BodyEnd {
    let mut lex = BlockCommentPiece::lexer(rest);
    while let Some(piece) = lex.next() {
        if piece == Ok(BlockCommentPiece::Close) {
            return BodyEnd {
                len: lex.span().end,
                closed: true,
            };
        }
    }
    BodyEnd {
        len: rest.len(),
        closed: false,
    }
}

/// Consumes a string body up to and including the closing quote.
///
/// Stops without consuming it in front of a line terminator, and at the end of input; both
/// leave the string open.
pub(crate) fn quoted_body<'s, P>(rest: &'s str) -> BodyEnd
where
    P: Logos<'s, Source = str> + QuotedPiece,
    P::Extras: Default,
{
    let mut lex = P::lexer(rest);
    loop {
        let position = rest.len() - lex.remainder().len();
        if lex.remainder().starts_with(['\r', '\n']) {
            return BodyEnd {
                len: position,
                closed: false,
            };
        }
        match lex.next() {
            Some(Ok(piece)) if piece.is_close() => {
                return BodyEnd {
                    len: lex.span().end,
                    closed: true,
                };
            }
            Some(_) => {}
            None => {
                return BodyEnd {
                    len: rest.len(),
                    closed: false,
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_tokens(source: &str) -> Vec<(RootToken, &str)> {
        let mut lex = RootToken::lexer(source);
        let mut out = Vec::new();
        while let Some(Ok(token)) = lex.next() {
            out.push((token, lex.slice()));
        }
        out
    }

    #[test]
    fn test_integer_and_float_shapes() {
        assert_eq!(
            root_tokens("42"),
            vec![(RootToken::Number(NumberShape::Integer), "42")]
        );
        assert_eq!(
            root_tokens("4.25"),
            vec![(RootToken::Number(NumberShape::Float), "4.25")]
        );
        assert_eq!(
            root_tokens("6e-3"),
            vec![(RootToken::Number(NumberShape::Float), "6e-3")]
        );
        assert_eq!(
            root_tokens(".5E+10"),
            vec![(RootToken::Number(NumberShape::Float), ".5E+10")]
        );
    }

    #[test]
    fn test_incomplete_number_tails_are_not_consumed() {
        assert_eq!(
            root_tokens("7.x"),
            vec![(RootToken::Number(NumberShape::Integer), "7")]
        );
        assert_eq!(
            root_tokens("7e"),
            vec![
                (RootToken::Number(NumberShape::Integer), "7"),
                (RootToken::Word, "e")
            ]
        );
    }

    #[test]
    fn test_operator_run_stops_before_comment() {
        assert_eq!(
            root_tokens("+=// note"),
            vec![
                (RootToken::OperatorRun, "+="),
                (RootToken::LineComment, "// note")
            ]
        );
        assert_eq!(
            root_tokens("-/*"),
            vec![
                (RootToken::OperatorRun, "-"),
                (RootToken::BlockCommentStart, "/*")
            ]
        );
        assert_eq!(root_tokens("/="), vec![(RootToken::OperatorRun, "/=")]);
    }

    #[test]
    fn test_block_comment_body() {
        assert_eq!(
            block_comment_body(" a ** b */ rest"),
            BodyEnd {
                len: 10,
                closed: true
            }
        );
        assert_eq!(
            block_comment_body("**/"),
            BodyEnd {
                len: 3,
                closed: true
            }
        );
        assert_eq!(
            block_comment_body(" never closed *"),
            BodyEnd {
                len: 15,
                closed: false
            }
        );
    }

    #[test]
    fn test_quoted_body_stops_at_line_end() {
        assert_eq!(
            quoted_body::<DoubleQuotedPiece>("abc\"x"),
            BodyEnd {
                len: 4,
                closed: true
            }
        );
        assert_eq!(
            quoted_body::<DoubleQuotedPiece>("abc\nnext"),
            BodyEnd {
                len: 3,
                closed: false
            }
        );
        assert_eq!(
            quoted_body::<SingleQuotedPiece>("it\\'s'"),
            BodyEnd {
                len: 6,
                closed: true
            }
        );
    }

    #[test]
    fn test_escape_takes_line_terminator() {
        assert_eq!(
            quoted_body::<DoubleQuotedPiece>("a\\\nb\""),
            BodyEnd {
                len: 5,
                closed: true
            }
        );
        assert_eq!(
            quoted_body::<SingleQuotedPiece>("a\\\r\nb'"),
            BodyEnd {
                len: 6,
                closed: true
            }
        );
        assert_eq!(
            quoted_body::<DoubleQuotedPiece>("a\\"),
            BodyEnd {
                len: 2,
                closed: false
            }
        );
    }
}
