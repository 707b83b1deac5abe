//! Scan pipeline
//!
//!     `text -> Scanner -> Classifier -> Structure Tracker -> Scan`
//!
//!     A scan is a pure function of its input. Nothing survives between calls, so callers may
//!     re-scan on every edit from any thread; debouncing rapid edits is their concern.

use crate::diagnostics::{lexical_diagnostics, sort_diagnostics, Diagnostic};
use crate::lexing::tokenize;
use crate::location::SourceLocation;
use crate::structure::{track_with_location, ScanOptions, Structure};
use crate::token::{Token, TokenKind};
use serde::Serialize;
use tracing::debug;

/// Everything derived from one full scan of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scan {
    pub tokens: Vec<Token>,
    pub structure: Structure,
    #[serde(skip)]
    location: SourceLocation,
}

impl Scan {
    /// Line index of the scanned text.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// Diagnostics derived from error tokens.
    pub fn lexical_diagnostics(&self) -> Vec<Diagnostic> {
        lexical_diagnostics(&self.tokens, &self.location)
    }

    /// Lexical and structural diagnostics ordered by position.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut all = self.lexical_diagnostics();
        all.extend(self.structure.diagnostics.iter().cloned());
        sort_diagnostics(&mut all);
        all
    }

    /// Tokens other than whitespace.
    pub fn significant_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(|token| token.kind != TokenKind::Whitespace)
    }
}

/// Scans `source` with default options.
pub fn scan(source: &str) -> Scan {
    scan_with(source, &ScanOptions::default())
}

pub fn scan_with(source: &str, options: &ScanOptions) -> Scan {
    let location = SourceLocation::new(source);
    let tokens = tokenize(source);
    let structure = track_with_location(&tokens, source, &location, options);

    debug!(
        bytes = source.len(),
        tokens = tokens.len(),
        bracket_pairs = structure.brackets.len(),
        folds = structure.folds.len(),
        diagnostics = structure.diagnostics.len(),
        "scanned document"
    );

    Scan {
        tokens,
        structure,
        location,
    }
}
