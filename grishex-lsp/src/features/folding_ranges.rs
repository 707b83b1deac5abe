use grishex_lexer::{FoldKind, Scan, TokenKind};
use lsp_types::FoldingRangeKind;

/// Whole-line fold in LSP terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrishexFoldingRange {
    pub start_line: u32,
    pub end_line: u32,
    pub kind: Option<FoldingRangeKind>,
}

/// Folds from the structure tracker plus one per multi-line block comment.
///
/// When a comment fold covers exactly the lines of a structural fold, only the comment fold is
/// kept so clients that allow one fold per start line still see the comment kind.
pub fn folding_ranges(scan: &Scan) -> Vec<GrishexFoldingRange> {
    let mut ranges = block_comment_folds(scan);
    ranges.extend(scan.structure.folds.iter().map(|fold| GrishexFoldingRange {
        start_line: fold.start_line as u32,
        end_line: fold.end_line as u32,
        kind: match fold.kind {
            FoldKind::RegionMarker => Some(FoldingRangeKind::Region),
            FoldKind::Indentation => None,
        },
    }));

    // Stable, so comment folds stay ahead of structural folds with the same lines
    ranges.sort_by_key(|range| (range.start_line, range.end_line));
    ranges.dedup_by(|later, earlier| {
        later.start_line == earlier.start_line && later.end_line == earlier.end_line
    });
    ranges
}

fn block_comment_folds(scan: &Scan) -> Vec<GrishexFoldingRange> {
    let location = scan.location();
    scan.tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Comment && !token.is_line_comment())
        .filter_map(|token| {
            let start_line = location.line_of_char(token.start);
            let end_line = location.line_of_char(token.end.saturating_sub(1));
            (end_line > start_line).then(|| GrishexFoldingRange {
                start_line: start_line as u32,
                end_line: end_line as u32,
                kind: Some(FoldingRangeKind::Comment),
            })
        })
        .collect()
}
