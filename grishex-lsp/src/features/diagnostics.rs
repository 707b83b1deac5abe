use grishex_config::DiagnosticsConfig;
use grishex_lexer::{Diagnostic, Scan};

/// Lexical and structural diagnostics allowed by the configuration, ordered by position.
pub fn collect_diagnostics(scan: &Scan, config: &DiagnosticsConfig) -> Vec<Diagnostic> {
    scan.diagnostics()
        .into_iter()
        .filter(|diagnostic| config.allows(diagnostic.kind))
        .collect()
}
