//! Language Server Protocol (LSP) implementation for grishex
//!
//!     Editor support for grishex contracts in any LSP client: highlighting, folding and
//!     diagnostics, all derived from one lexical scan of the document.
//!
//! Feature Set
//!
//!     1. Semantic Tokens (textDocument/semanticTokens/full):
//!         - keyword, variable, number, string, comment and operator classes
//!         - brackets and whitespace are left to the editor, error tokens become diagnostics
//!         - multi-line tokens (block comments) are split per line
//!
//!     2. Folding Ranges (textDocument/foldingRange):
//!         - `// region` / `// endregion` blocks as region folds
//!         - indentation blocks
//!         - multi-line block comments as comment folds
//!
//!     3. Diagnostics (textDocument/publishDiagnostics):
//!         - unterminated strings, invalid characters, unrecognized operator runs
//!         - unmatched brackets, unpaired region markers
//!         - published after every open and change, cleared on close
//!
//! Architecture
//!
//!     Server Layer (server.rs):
//!         - Implements the tower-lsp LanguageServer trait
//!         - Keeps one scan per open document, re-scanned in full on every change
//!         - Converts engine positions (character columns) to LSP positions (UTF-16 columns)
//!
//!     Feature Layer (features/):
//!         - Stateless functions over a `Scan`, behind the `FeatureProvider` trait so the
//!           server can be tested with a mock
//!
//! Usage
//!
//!     $ grishex-lsp
//!     Starts the language server on stdin/stdout. `./grishex.toml` is read at startup.

pub mod features;
pub mod server;

pub use server::{DefaultFeatureProvider, FeatureProvider, GrishexLanguageServer, LspClient};
