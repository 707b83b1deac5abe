//! Language configuration
//!
//! Declarative editing metadata for grishex: comment syntax, bracket pairs, auto-closing and
//! surrounding pairs, and the region folding markers. Editors use it for behaviour that needs
//! no scanning, like toggling comments or closing a typed `(`.

use crate::structure::closing_for;
use crate::structure::regions::{REGION_END_PATTERN, REGION_START_PATTERN};
use serde::Serialize;

/// Language identifier used by editors and the language server.
pub const LANGUAGE_ID: &str = "grishex";

/// File extension of grishex sources.
pub const FILE_EXTENSION: &str = "grx";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentSyntax {
    pub line_comment: &'static str,
    pub block_comment: (&'static str, &'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterPair {
    pub open: &'static str,
    pub close: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoldingMarkers {
    pub start: &'static str,
    pub end: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageConfiguration {
    pub id: &'static str,
    pub extensions: Vec<&'static str>,
    pub comments: CommentSyntax,
    pub brackets: Vec<CharacterPair>,
    pub auto_closing_pairs: Vec<CharacterPair>,
    pub surrounding_pairs: Vec<CharacterPair>,
    pub folding_markers: FoldingMarkers,
}

const BRACKET_OPENERS: [&str; 3] = ["{", "[", "("];

fn pair(open: &'static str, close: &'static str) -> CharacterPair {
    CharacterPair { open, close }
}

fn bracket_pairs() -> Vec<CharacterPair> {
    BRACKET_OPENERS
        .iter()
        .filter_map(|&open| closing_for(open).map(|close| pair(open, close)))
        .collect()
}

fn quoting_pairs() -> Vec<CharacterPair> {
    let mut pairs = bracket_pairs();
    pairs.push(pair("\"", "\""));
    pairs.push(pair("'", "'"));
    pairs
}

impl LanguageConfiguration {
    pub fn grishex() -> Self {
        Self {
            id: LANGUAGE_ID,
            extensions: vec![FILE_EXTENSION],
            comments: CommentSyntax {
                line_comment: "//",
                block_comment: ("/*", "*/"),
            },
            brackets: bracket_pairs(),
            auto_closing_pairs: quoting_pairs(),
            surrounding_pairs: quoting_pairs(),
            folding_markers: FoldingMarkers {
                start: REGION_START_PATTERN,
                end: REGION_END_PATTERN,
            },
        }
    }

    /// The closing counterpart of an auto-closed opening character.
    pub fn auto_close(&self, open: &str) -> Option<&'static str> {
        self.auto_closing_pairs
            .iter()
            .find(|pair| pair.open == open)
            .map(|pair| pair.close)
    }
}

impl Default for LanguageConfiguration {
    fn default() -> Self {
        Self::grishex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brackets_follow_tracker_pairs() {
        let config = LanguageConfiguration::grishex();
        let brackets: Vec<_> = config.brackets.iter().map(|p| (p.open, p.close)).collect();
        assert_eq!(brackets, vec![("{", "}"), ("[", "]"), ("(", ")")]);
    }

    #[test]
    fn test_auto_close() {
        let config = LanguageConfiguration::grishex();
        assert_eq!(config.auto_close("'"), Some("'"));
        assert_eq!(config.auto_close("["), Some("]"));
        assert_eq!(config.auto_close("<"), None);
        assert_eq!(config.surrounding_pairs, config.auto_closing_pairs);
    }

    #[test]
    fn test_serializes_block_comment_as_pair() {
        let json = serde_json::to_value(LanguageConfiguration::grishex()).unwrap();
        assert_eq!(json["comments"]["block_comment"], serde_json::json!(["/*", "*/"]));
        assert_eq!(json["id"], "grishex");
    }
}
