//! Command implementations
//!
//!     Each command scans its input once and renders the result to a `String`; `main` decides
//!     where it goes. Diagnostics in the input never make a command fail, only `check` turns
//!     them into an exit status.

use crate::error::CliError;
use grishex_config::{GrishexConfig, TokenFormat};
use grishex_lexer::{scan_with, Diagnostic, LanguageConfiguration, Scan, SourceLocation, Token};
use serde::Serialize;
use std::io::Read;
use tracing::debug;

/// Source text plus the name used for it in messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub label: String,
    pub text: String,
}

impl Input {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Reads `path`, or stdin when it is `-`.
pub fn read_input(path: &str) -> Result<Input, CliError> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CliError::Io {
                path: "<stdin>".to_string(),
                source,
            })?;
        return Ok(Input::new("<stdin>", text));
    }

    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })?;
    Ok(Input::new(path, text))
}

fn scan_input(input: &Input, config: &GrishexConfig) -> Scan {
    let result = scan_with(&input.text, &config.folding.to_scan_options());
    debug!(input = %input.label, tokens = result.tokens.len(), "scanned input");
    result
}

/// Output of `check`: the rendered report and whether any error was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub output: String,
    pub has_errors: bool,
}

pub fn tokens(
    input: &Input,
    config: &GrishexConfig,
    format: TokenFormat,
    include_whitespace: bool,
) -> Result<String, CliError> {
    let result = scan_input(input, config);
    let selected: Vec<&Token> = if include_whitespace {
        result.tokens.iter().collect()
    } else {
        result.significant_tokens().collect()
    };

    match format {
        TokenFormat::Table => Ok(render_table(&selected, result.location())),
        TokenFormat::Simple => Ok(selected.iter().map(|t| t.lexeme.as_str()).collect()),
        TokenFormat::Json => to_json(&selected),
    }
}

fn render_table(tokens: &[&Token], location: &SourceLocation) -> String {
    let rows: Vec<(String, &Token)> = tokens
        .iter()
        .map(|token| {
            let position = location.position(token.start);
            (
                format!("{}:{}", position.line + 1, position.column + 1),
                *token,
            )
        })
        .collect();
    let width = rows.iter().map(|(pos, _)| pos.len()).max().unwrap_or(0);

    rows.iter()
        .map(|(pos, token)| {
            format!(
                "{:<width$}  {:<13}  {:?}\n",
                pos,
                token.kind.as_str(),
                token.lexeme,
                width = width
            )
        })
        .collect()
}

pub fn structure(input: &Input, config: &GrishexConfig) -> Result<String, CliError> {
    let mut structure = scan_input(input, config).structure;
    if !config.diagnostics.structural {
        structure.diagnostics.clear();
    }
    to_json(&structure)
}

pub fn check(input: &Input, config: &GrishexConfig) -> CheckReport {
    let result = scan_input(input, config);
    let diagnostics: Vec<Diagnostic> = result
        .diagnostics()
        .into_iter()
        .filter(|d| config.diagnostics.allows(d.kind))
        .collect();

    let has_errors = diagnostics.iter().any(Diagnostic::is_error);
    let mut output: String = diagnostics
        .iter()
        .map(|d| format_diagnostic(&input.label, d))
        .collect();
    if !has_errors {
        output.push_str("ok\n");
    }

    CheckReport { output, has_errors }
}

/// `<path>:<line>:<column>: <severity>[<code>]: <message>`, one-based like compilers print.
pub fn format_diagnostic(label: &str, diagnostic: &Diagnostic) -> String {
    format!(
        "{}:{}:{}: {}[{}]: {}\n",
        label,
        diagnostic.range.start.line + 1,
        diagnostic.range.start.column + 1,
        diagnostic.severity,
        diagnostic.code(),
        diagnostic.message
    )
}

pub fn language() -> Result<String, CliError> {
    to_json(&LanguageConfiguration::grishex())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
