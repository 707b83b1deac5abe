//! Structure tracker
//!
//!     Derives structural views from a finished token stream:
//!
//!         - bracket pairs, see [brackets]
//!         - indentation folds, see [folding]
//!         - region marker folds, see [regions]
//!
//!     The tracker never aborts. Extra closers, openers left open and region markers that do
//!     not pair up are reported as diagnostics next to whatever pairs and folds could still be
//!     computed, so an editor can keep highlighting and folding a half-typed document.

pub mod brackets;
pub mod folding;
pub mod regions;

pub use brackets::{bracket_diagnostics, closing_for, match_brackets, BracketMatches, BracketPair};
pub use folding::{indentation_folds, indentation_of};
pub use regions::{region_folds, region_marker, RegionMarker};

use crate::diagnostics::{sort_diagnostics, Diagnostic};
use crate::location::SourceLocation;
use crate::token::Token;
use serde::Serialize;

/// Knobs for structure tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOptions {
    /// Columns a tab advances to (the next multiple). Zero behaves as one.
    pub tab_size: usize,
    pub indentation_folding: bool,
    pub region_folding: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            tab_size: 4,
            indentation_folding: true,
            region_folding: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FoldKind {
    Indentation,
    RegionMarker,
}

/// A collapsible line interval. Lines are zero-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FoldRange {
    pub start_line: usize,
    pub end_line: usize,
    pub kind: FoldKind,
}

impl FoldRange {
    pub fn new(start_line: usize, end_line: usize, kind: FoldKind) -> Self {
        Self {
            start_line,
            end_line,
            kind,
        }
    }
}

/// Structural summary of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Structure {
    /// Every opener in source order; unmatched ones have no closer.
    pub brackets: Vec<BracketPair>,
    pub unmatched_closers: Vec<Token>,
    /// Sorted by start line, then end line.
    pub folds: Vec<FoldRange>,
    /// Structural problems ordered by position.
    pub diagnostics: Vec<Diagnostic>,
}

impl Structure {
    pub fn matched_pairs(&self) -> impl Iterator<Item = &BracketPair> {
        self.brackets.iter().filter(|pair| pair.is_matched())
    }

    pub fn unmatched_openers(&self) -> impl Iterator<Item = &BracketPair> {
        self.brackets.iter().filter(|pair| !pair.is_matched())
    }

    /// Number of unmatched brackets of either direction.
    pub fn unmatched_count(&self) -> usize {
        self.unmatched_openers().count() + self.unmatched_closers.len()
    }

    pub fn folds_of(&self, kind: FoldKind) -> impl Iterator<Item = &FoldRange> {
        self.folds.iter().filter(move |fold| fold.kind == kind)
    }
}

/// Computes brackets, folds and structural diagnostics for a token stream of `source`.
pub fn track(tokens: &[Token], source: &str, options: &ScanOptions) -> Structure {
    let location = SourceLocation::new(source);
    track_with_location(tokens, source, &location, options)
}

pub(crate) fn track_with_location(
    tokens: &[Token],
    source: &str,
    location: &SourceLocation,
    options: &ScanOptions,
) -> Structure {
    let matches = match_brackets(tokens);
    let mut diagnostics = bracket_diagnostics(&matches, location);
    let mut folds = Vec::new();

    if options.indentation_folding {
        folds.extend(indentation_folds(source, location, options.tab_size));
    }
    if options.region_folding {
        let (region, region_diagnostics) = region_folds(source, location);
        folds.extend(region);
        diagnostics.extend(region_diagnostics);
    }

    folds.sort();
    sort_diagnostics(&mut diagnostics);

    Structure {
        brackets: matches.pairs,
        unmatched_closers: matches.unmatched_closers,
        folds,
        diagnostics,
    }
}
