use grishex_lexer::{Range, Scan, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrishexSemanticTokenKind {
    Keyword,
    Variable,
    Number,
    String,
    Comment,
    Operator,
}

impl GrishexSemanticTokenKind {
    /// Standard LSP token type names, so existing editor themes color them.
    pub fn as_str(self) -> &'static str {
        match self {
            GrishexSemanticTokenKind::Keyword => "keyword",
            GrishexSemanticTokenKind::Variable => "variable",
            GrishexSemanticTokenKind::Number => "number",
            GrishexSemanticTokenKind::String => "string",
            GrishexSemanticTokenKind::Comment => "comment",
            GrishexSemanticTokenKind::Operator => "operator",
        }
    }

    /// Highlight class of a lexical token kind.
    ///
    /// Whitespace and brackets are left to the editor. Error kinds are reported as diagnostics
    /// instead of being colored.
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Keyword => Some(GrishexSemanticTokenKind::Keyword),
            TokenKind::Identifier => Some(GrishexSemanticTokenKind::Variable),
            TokenKind::Number | TokenKind::NumberFloat => Some(GrishexSemanticTokenKind::Number),
            TokenKind::String => Some(GrishexSemanticTokenKind::String),
            TokenKind::Comment => Some(GrishexSemanticTokenKind::Comment),
            TokenKind::Operator => Some(GrishexSemanticTokenKind::Operator),
            TokenKind::InvalidString
            | TokenKind::Unrecognized
            | TokenKind::Invalid
            | TokenKind::Bracket
            | TokenKind::Whitespace => None,
        }
    }
}

/// Legend order; the encoded token type is an index into this table.
pub const SEMANTIC_TOKEN_KINDS: &[GrishexSemanticTokenKind] = &[
    GrishexSemanticTokenKind::Keyword,
    GrishexSemanticTokenKind::Variable,
    GrishexSemanticTokenKind::Number,
    GrishexSemanticTokenKind::String,
    GrishexSemanticTokenKind::Comment,
    GrishexSemanticTokenKind::Operator,
];

#[derive(Debug, Clone, PartialEq)]
pub struct GrishexSemanticToken {
    pub kind: GrishexSemanticTokenKind,
    pub range: Range,
}

/// Highlighted tokens in document order.
pub fn collect_semantic_tokens(scan: &Scan) -> Vec<GrishexSemanticToken> {
    let location = scan.location();
    scan.tokens
        .iter()
        .filter_map(|token| {
            GrishexSemanticTokenKind::from_token_kind(token.kind).map(|kind| GrishexSemanticToken {
                kind,
                range: location.token_range(token),
            })
        })
        .collect()
}
