//! # grishex-lexer
//!
//! Lexical analysis engine for the grishex contract language.
//!
//!     The engine turns source text into a lossless stream of classified tokens and derives
//!     the structural hints editors need: matched brackets and foldable line ranges. It does no
//!     parsing and no semantic analysis.
//!
//! Layout
//!
//!     src/
//!       ├── token.rs        Token and the closed TokenKind vocabulary
//!       ├── lexing/         Scanner state machine, raw logos tokens, Classifier
//!       ├── structure/      Bracket matching, indentation and region folding
//!       ├── location.rs     Offset to line/column conversion
//!       ├── diagnostics.rs  Lexical and structural problems as data
//!       ├── language.rs     Declarative editing metadata
//!       └── pipeline.rs     `scan(text) -> Scan`
//!
//! Usage
//!
//!     let result = grishex_lexer::scan(source);
//!     for token in &result.tokens { ... }
//!     for fold in &result.structure.folds { ... }
//!
//!     Every call is independent: there is no state between scans.

pub mod diagnostics;
pub mod language;
pub mod lexing;
pub mod location;
pub mod pipeline;
pub mod structure;
pub mod testing;
pub mod token;

pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSeverity};
pub use language::LanguageConfiguration;
pub use lexing::{classify, detokenize, tokenize, LexState, Scanner};
pub use location::{Position, Range, SourceLocation};
pub use pipeline::{scan, scan_with, Scan};
pub use structure::{track, BracketPair, FoldKind, FoldRange, ScanOptions, Structure};
pub use token::{Token, TokenKind};
