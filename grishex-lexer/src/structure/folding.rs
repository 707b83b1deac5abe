//! Indentation folding
//!
//!     A line folds when the non-blank lines that follow it are indented deeper. The fold runs
//!     from that line to the last deeper non-blank line before the next line at its own column
//!     or shallower. Blank lines never break a block and never end one, so trailing blank lines
//!     stay outside the fold.
//!
//!     Columns expand tabs to the next multiple of the tab size.
//!
//!     One pass with a stack of enclosing lines: a line pops every entry at its column or deeper,
//!     and each popped entry that saw deeper lines since it was pushed closes a fold.

use super::{FoldKind, FoldRange};
use crate::location::SourceLocation;

/// Visual column of the first non-whitespace character, or `None` for a blank line.
pub fn indentation_of(line: &str, tab_size: usize) -> Option<usize> {
    let tab_size = tab_size.max(1);
    let mut column = 0;
    for ch in line.chars() {
        match ch {
            '\t' => column += tab_size - column % tab_size,
            '\r' | '\n' => return None,
            c if c.is_whitespace() => column += 1,
            _ => return Some(column),
        }
    }
    None
}

pub fn indentation_folds(source: &str, location: &SourceLocation, tab_size: usize) -> Vec<FoldRange> {
    let mut folds = Vec::new();
    // (line, column) of lines that may still open a fold
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut previous_content_line: Option<usize> = None;

    for line in 0..location.line_count() {
        let Some(span) = location.line_span(line) else {
            break;
        };
        let Some(column) = indentation_of(&source[span], tab_size) else {
            continue;
        };

        while let Some(&(open_line, open_column)) = stack.last() {
            if open_column < column {
                break;
            }
            stack.pop();
            if let Some(end_line) = previous_content_line.filter(|&end| end > open_line) {
                folds.push(FoldRange::new(open_line, end_line, FoldKind::Indentation));
            }
        }

        stack.push((line, column));
        previous_content_line = Some(line);
    }

    while let Some((open_line, _)) = stack.pop() {
        if let Some(end_line) = previous_content_line.filter(|&end| end > open_line) {
            folds.push(FoldRange::new(open_line, end_line, FoldKind::Indentation));
        }
    }

    folds.sort();
    folds
}
