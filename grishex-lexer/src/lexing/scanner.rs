//! Scanner
//!
//!     A single left-to-right pass over the source that yields one token per call. The scanner
//!     is an explicit state machine over [LexState]; each state has its own function and the
//!     driver in [Scanner::next_token] only dispatches and applies transitions.
//!
//!         Root ──"──▶ InDoubleQuoteString ──"/eol/eof──▶ Root
//!         Root ──'──▶ InSingleQuoteString ──'/eol/eof──▶ Root
//!         Root ──/*─▶ InBlockComment      ──*/ or eof──▶ Root
//!
//!     The Root state delegates recognition to the logos generated [RootToken] automaton. The
//!     other states run their own logos piece lexers over the remaining input and then advance
//!     the root lexer past what they consumed, so the root lexer is always the single source of
//!     truth for the current position.
//!
//!     Whitespace is emitted as `Whitespace` tokens. Together with the rest of the stream it
//!     covers the input with no gaps or overlaps.

use super::classifier::classify;
use super::raw::{self, DoubleQuotedPiece, NumberShape, RootToken, SingleQuotedPiece};
use crate::token::{Token, TokenKind};
use logos::Logos;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use std::ops::Range;
use tracing::trace;

/// Lexical mode of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LexState {
    #[default]
    Root,
    InBlockComment,
    InDoubleQuoteString,
    InSingleQuoteString,
}

impl fmt::Display for LexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LexState::Root => "root",
            LexState::InBlockComment => "block-comment",
            LexState::InDoubleQuoteString => "double-quote-string",
            LexState::InSingleQuoteString => "single-quote-string",
        };
        f.write_str(name)
    }
}

/// Outcome of running one state function.
enum Step {
    /// Produce a token with a candidate kind over the given byte range.
    Emit(TokenKind, Range<usize>),
    /// Switch to another state and keep going.
    Enter(LexState),
    /// Bytes no rule accepts. Each character becomes its own `Invalid` token.
    Reject(Range<usize>),
    Finished,
}

/// Token iterator over a source string.
pub struct Scanner<'src> {
    source: &'src str,
    root: logos::Lexer<'src, RootToken>,
    state: LexState,
    /// Byte offset where the token being assembled outside Root began.
    token_start: usize,
    /// Character offset of the next token to be emitted.
    char_offset: usize,
    pending: VecDeque<Token>,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            root: RootToken::lexer(source),
            state: LexState::Root,
            token_start: 0,
            char_offset: 0,
            pending: VecDeque::new(),
        }
    }

    /// Current lexical state.
    pub fn state(&self) -> LexState {
        self.state
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> usize {
        self.source.len() - self.root.remainder().len()
    }

    /// Produces the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }

        loop {
            let step = match self.state {
                LexState::Root => self.root_state(),
                LexState::InBlockComment => self.block_comment_state(),
                LexState::InDoubleQuoteString => self.quoted_state::<DoubleQuotedPiece>(),
                LexState::InSingleQuoteString => self.quoted_state::<SingleQuotedPiece>(),
            };

            match step {
                Step::Emit(kind, span) => {
                    let token = self.emit(kind, span);
                    if self.state != LexState::Root {
                        self.transition(LexState::Root);
                    }
                    return Some(token);
                }
                Step::Enter(state) => self.transition(state),
                Step::Reject(span) => {
                    self.reject(span);
                    return self.pending.pop_front();
                }
                Step::Finished => return None,
            }
        }
    }

    fn transition(&mut self, to: LexState) {
        trace!(from = %self.state, to = %to, offset = self.offset(), "lexer state transition");
        self.state = to;
    }

    fn root_state(&mut self) -> Step {
        let Some(result) = self.root.next() else {
            return Step::Finished;
        };
        let span = self.root.span();

        match result {
            Ok(RootToken::Whitespace) => Step::Emit(TokenKind::Whitespace, span),
            Ok(RootToken::Word) => Step::Emit(TokenKind::Identifier, span),
            Ok(RootToken::Number(NumberShape::Integer)) => Step::Emit(TokenKind::Number, span),
            Ok(RootToken::Number(NumberShape::Float)) => Step::Emit(TokenKind::NumberFloat, span),
            Ok(RootToken::LineComment) => Step::Emit(TokenKind::Comment, span),
            Ok(RootToken::Bracket) => Step::Emit(TokenKind::Bracket, span),
            Ok(RootToken::OperatorRun) => Step::Emit(TokenKind::Operator, span),
            Ok(RootToken::DoubleQuote) => {
                self.token_start = span.start;
                Step::Enter(LexState::InDoubleQuoteString)
            }
            Ok(RootToken::SingleQuote) => {
                self.token_start = span.start;
                Step::Enter(LexState::InSingleQuoteString)
            }
            Ok(RootToken::BlockCommentStart) => {
                self.token_start = span.start;
                Step::Enter(LexState::InBlockComment)
            }
            Err(()) => Step::Reject(span),
        }
    }

    /// Runs to `*/` or the end of input. An unterminated comment is still a comment.
    fn block_comment_state(&mut self) -> Step {
        let body = raw::block_comment_body(self.root.remainder());
        self.root.bump(body.len);
        Step::Emit(TokenKind::Comment, self.token_start..self.offset())
    }

    /// Runs to the closing quote; a line terminator or the end of input first makes the
    /// literal an `InvalidString`.
    fn quoted_state<P>(&mut self) -> Step
    where
        P: Logos<'src, Source = str> + raw::QuotedPiece,
        P::Extras: Default,
    {
        let body = raw::quoted_body::<P>(self.root.remainder());
        self.root.bump(body.len);
        let kind = if body.closed {
            TokenKind::String
        } else {
            TokenKind::InvalidString
        };
        Step::Emit(kind, self.token_start..self.offset())
    }

    fn emit(&mut self, candidate: TokenKind, span: Range<usize>) -> Token {
        let lexeme = &self.source[span.clone()];
        let kind = classify(lexeme, candidate);
        let token = Token::new(kind, lexeme, self.char_offset, span);
        self.char_offset = token.end;
        token
    }

    /// Queues one `Invalid` token per character of a rejected range.
    fn reject(&mut self, span: Range<usize>) {
        let mut end = span.end.max(span.start + 1);
        while !self.source.is_char_boundary(end) {
            end += 1;
        }
        let consumed = self.offset();
        if end > consumed {
            self.root.bump(end - consumed);
        }

        for (index, ch) in self.source[span.start..end].char_indices() {
            let start = span.start + index;
            let token = self.emit(TokenKind::Invalid, start..start + ch.len_utf8());
            self.pending.push_back(token);
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(TokenKind, String)> {
        Scanner::new(source)
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| (t.kind, t.lexeme))
            .collect()
    }

    fn pair(kind: TokenKind, lexeme: &str) -> (TokenKind, String) {
        (kind, lexeme.to_string())
    }

    #[test]
    fn test_empty_input() {
        let mut scanner = Scanner::new("");
        assert_eq!(scanner.next_token(), None);
        assert_eq!(scanner.state(), LexState::Root);
    }

    #[test]
    fn test_let_statement() {
        assert_eq!(
            kinds("let total = 42;"),
            vec![
                pair(TokenKind::Keyword, "let"),
                pair(TokenKind::Identifier, "total"),
                pair(TokenKind::Operator, "="),
                pair(TokenKind::Number, "42"),
                pair(TokenKind::Invalid, ";"),
            ]
        );
    }

    #[test]
    fn test_whitespace_is_emitted() {
        let tokens: Vec<_> = Scanner::new("a \t\nb").collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[1].lexeme, " \t\n");
        assert_eq!(tokens[1].start, 1);
        assert_eq!(tokens[1].end, 4);
    }

    #[test]
    fn test_operator_run_splitting() {
        assert_eq!(
            kinds("a<<=b"),
            vec![
                pair(TokenKind::Identifier, "a"),
                pair(TokenKind::Operator, "<<="),
                pair(TokenKind::Identifier, "b"),
            ]
        );
        assert_eq!(
            kinds("a<<<b"),
            vec![
                pair(TokenKind::Identifier, "a"),
                pair(TokenKind::Unrecognized, "<<<"),
                pair(TokenKind::Identifier, "b"),
            ]
        );
        assert_eq!(
            kinds("foo !!! bar"),
            vec![
                pair(TokenKind::Identifier, "foo"),
                pair(TokenKind::Unrecognized, "!!!"),
                pair(TokenKind::Identifier, "bar"),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_at_end_of_input() {
        assert_eq!(
            kinds("let x = \"abc"),
            vec![
                pair(TokenKind::Keyword, "let"),
                pair(TokenKind::Identifier, "x"),
                pair(TokenKind::Operator, "="),
                pair(TokenKind::InvalidString, "\"abc"),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_stops_at_line_end() {
        let tokens: Vec<_> = Scanner::new("'abc\nok").collect();
        assert_eq!(tokens[0].kind, TokenKind::InvalidString);
        assert_eq!(tokens[0].lexeme, "'abc");
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[1].lexeme, "\n");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_strings_with_escapes() {
        assert_eq!(
            kinds(r#""say \"hi\"" 'it\'s'"#),
            vec![
                pair(TokenKind::String, r#""say \"hi\"""#),
                pair(TokenKind::String, r"'it\'s'"),
            ]
        );
    }

    #[test]
    fn test_quote_inside_other_quote() {
        assert_eq!(
            kinds(r#""it's" '"'"#),
            vec![
                pair(TokenKind::String, "\"it's\""),
                pair(TokenKind::String, "'\"'"),
            ]
        );
    }

    #[test]
    fn test_block_comment_closed_and_open() {
        assert_eq!(
            kinds("/* a\n b */x"),
            vec![
                pair(TokenKind::Comment, "/* a\n b */"),
                pair(TokenKind::Identifier, "x"),
            ]
        );
        assert_eq!(
            kinds("/* never closed"),
            vec![pair(TokenKind::Comment, "/* never closed")]
        );
    }

    #[test]
    fn test_line_comment_excludes_terminator() {
        let tokens: Vec<_> = Scanner::new("// note\r\nx").collect();
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].lexeme, "// note");
        assert_eq!(tokens[1].lexeme, "\r\n");
    }

    #[test]
    fn test_brackets_are_single_characters() {
        assert_eq!(
            kinds("{[()]}"),
            "{[()]}"
                .chars()
                .map(|c| pair(TokenKind::Bracket, &c.to_string()))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_non_ascii_characters_are_invalid_one_by_one() {
        let tokens: Vec<_> = Scanner::new("é€x").collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        assert_eq!(tokens[0].lexeme, "é");
        assert_eq!(tokens[0].span, 0..2);
        assert_eq!((tokens[1].start, tokens[1].end), (1, 2));
        assert_eq!(tokens[1].lexeme, "€");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].start, 2);
        assert_eq!(tokens[2].span, 5..6);
    }

    #[test]
    fn test_lone_dot_is_invalid() {
        assert_eq!(
            kinds("a.b .5"),
            vec![
                pair(TokenKind::Identifier, "a"),
                pair(TokenKind::Invalid, "."),
                pair(TokenKind::Identifier, "b"),
                pair(TokenKind::NumberFloat, ".5"),
            ]
        );
    }

    #[test]
    fn test_state_returns_to_root_after_each_token() {
        let mut scanner = Scanner::new("\"s\" /* c */ 'x");
        while scanner.next_token().is_some() {
            assert_eq!(scanner.state(), LexState::Root);
        }
        assert_eq!(scanner.offset(), "\"s\" /* c */ 'x".len());
    }
}
