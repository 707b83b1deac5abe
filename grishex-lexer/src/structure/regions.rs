//! Region marker folding
//!
//!     Lines whose trimmed text reads `// region` or `// endregion` (each optionally spelled
//!     with a `#`) delimit explicit folds. Markers nest on their own stack in textual order;
//!     indentation plays no part. Matching runs on line text, not on tokens, so a marker line
//!     inside a block comment still counts while `x = 1 // region` does not.

use super::{FoldKind, FoldRange};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::location::{Range, SourceLocation};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range as ByteRange;

/// Pattern source for a trimmed line opening a region.
pub const REGION_START_PATTERN: &str = r"^//\s*#?region\b";
/// Pattern source for a trimmed line closing a region.
pub const REGION_END_PATTERN: &str = r"^//\s*#?endregion\b";

static REGION_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(REGION_START_PATTERN).expect("region start pattern is valid"));

static REGION_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(REGION_END_PATTERN).expect("region end pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionMarker {
    Start,
    End,
}

/// Classifies the text of a line with surrounding whitespace removed.
pub fn region_marker(trimmed: &str) -> Option<RegionMarker> {
    if REGION_START.is_match(trimmed) {
        Some(RegionMarker::Start)
    } else if REGION_END.is_match(trimmed) {
        Some(RegionMarker::End)
    } else {
        None
    }
}

/// Range of the trimmed text of `line`.
fn marker_range(
    source: &str,
    location: &SourceLocation,
    line: usize,
    span: ByteRange<usize>,
) -> Range {
    let text = &source[span.clone()];
    let leading = &text[..text.len() - text.trim_start().len()];
    let marker = text.trim();
    let byte_start = span.start + leading.len();
    let char_start = location.line_char_start(line).unwrap_or(0) + leading.chars().count();
    Range::new(
        byte_start..byte_start + marker.len(),
        location.position(char_start),
        location.position(char_start + marker.chars().count()),
    )
}

/// Region folds plus diagnostics for markers that do not pair up.
pub fn region_folds(source: &str, location: &SourceLocation) -> (Vec<FoldRange>, Vec<Diagnostic>) {
    let mut folds = Vec::new();
    let mut diagnostics = Vec::new();
    let mut open: Vec<(usize, ByteRange<usize>)> = Vec::new();

    for line in 0..location.line_count() {
        let Some(span) = location.line_span(line) else {
            break;
        };

        match region_marker(source[span.clone()].trim()) {
            Some(RegionMarker::Start) => open.push((line, span)),
            Some(RegionMarker::End) => match open.pop() {
                Some((start_line, _)) => {
                    folds.push(FoldRange::new(start_line, line, FoldKind::RegionMarker));
                }
                None => diagnostics.push(Diagnostic::new(
                    DiagnosticKind::UnmatchedEndRegion,
                    marker_range(source, location, line, span),
                    "endregion marker without an open region",
                )),
            },
            None => {}
        }
    }

    for (line, span) in open {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnterminatedRegion,
            marker_range(source, location, line, span),
            "region is never closed",
        ));
    }

    folds.sort();
    (folds, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SAMPLE_CONTRACT;

    fn regions(source: &str) -> (Vec<(usize, usize)>, Vec<DiagnosticKind>) {
        let (folds, diagnostics) = region_folds(source, &SourceLocation::new(source));
        (
            folds.iter().map(|f| (f.start_line, f.end_line)).collect(),
            diagnostics.iter().map(|d| d.kind).collect(),
        )
    }

    #[test]
    fn test_marker_spellings() {
        assert_eq!(region_marker("// region"), Some(RegionMarker::Start));
        assert_eq!(region_marker("//region Storage"), Some(RegionMarker::Start));
        assert_eq!(region_marker("// #region"), Some(RegionMarker::Start));
        assert_eq!(region_marker("//#endregion"), Some(RegionMarker::End));
        assert_eq!(region_marker("// endregion done"), Some(RegionMarker::End));
        assert_eq!(region_marker("// regions"), None);
        assert_eq!(region_marker("// the region"), None);
        assert_eq!(region_marker("/* region */"), None);
    }

    #[test]
    fn test_region_from_line_two_to_ten() {
        let mut lines = vec!["let a = 1"; 12];
        lines[2] = "// region";
        lines[10] = "// endregion";
        let source = lines.join("\n");
        assert_eq!(regions(&source), (vec![(2, 10)], vec![]));
    }

    #[test]
    fn test_nesting_by_textual_order() {
        let source = "// region a\n        // region b\n// endregion\n    // endregion\n";
        assert_eq!(regions(source), (vec![(0, 3), (1, 2)], vec![]));
    }

    #[test]
    fn test_trailing_marker_comment_does_not_count() {
        let source = "x = 1 // region\n// endregion\n";
        assert_eq!(
            regions(source),
            (vec![], vec![DiagnosticKind::UnmatchedEndRegion])
        );
    }

    #[test]
    fn test_marker_lines_inside_block_comments_count() {
        let source = "/*\n// region\n*/\nx\n/*\n// endregion\n*/\n";
        assert_eq!(regions(source), (vec![(1, 5)], vec![]));
    }

    #[test]
    fn test_indented_and_crlf_markers() {
        let source =
            "contract A {\r\n\t  // region storage\r\n    let x = 1\r\n    //#endregion\r\n}\r\n";
        assert_eq!(regions(source), (vec![(1, 3)], vec![]));
    }

    #[test]
    fn test_diagnostic_covers_trimmed_marker() {
        let source = "x\n  // endregion  \n";
        let (_, diagnostics) = region_folds(source, &SourceLocation::new(source));
        assert_eq!(diagnostics.len(), 1);
        let range = &diagnostics[0].range;
        assert_eq!(&source[range.span.clone()], "// endregion");
        assert_eq!(range.start, crate::location::Position::new(1, 2));
        assert_eq!(range.end, crate::location::Position::new(1, 14));
    }

    #[test]
    fn test_unterminated_region() {
        let source = "// region outer\n// region inner\n// endregion\n";
        assert_eq!(
            regions(source),
            (vec![(1, 2)], vec![DiagnosticKind::UnterminatedRegion])
        );
    }

    #[test]
    fn test_sample_contract_regions() {
        assert_eq!(regions(SAMPLE_CONTRACT), (vec![(0, 35), (17, 27)], vec![]));
    }
}
