//! Shared configuration loader for the grishex tools.
//!
//! `defaults/grishex.default.toml` is embedded into every binary so that docs and runtime
//! behavior stay in sync. Applications layer user files on top of those defaults via
//! [`Loader`] before deserializing into [`GrishexConfig`].
//!
//! [`logging`] holds the tracing setup every grishex binary runs at startup.

pub mod logging;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use grishex_lexer::ScanOptions;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/grishex.default.toml");

/// Name of the per-project configuration file picked up from the working directory.
pub const PROJECT_CONFIG_FILE: &str = "grishex.toml";

/// Top-level configuration consumed by grishex applications.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GrishexConfig {
    pub folding: FoldingConfig,
    pub diagnostics: DiagnosticsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FoldingConfig {
    pub tab_size: usize,
    pub indentation: bool,
    pub region_markers: bool,
}

impl FoldingConfig {
    /// Engine options for these folding settings.
    pub fn to_scan_options(&self) -> ScanOptions {
        ScanOptions {
            tab_size: self.tab_size,
            indentation_folding: self.indentation,
            region_folding: self.region_markers,
        }
    }
}

/// Which diagnostic families are reported.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiagnosticsConfig {
    pub lexical: bool,
    pub structural: bool,
}

impl DiagnosticsConfig {
    /// Whether a diagnostic of this kind should be reported.
    pub fn allows(&self, kind: grishex_lexer::DiagnosticKind) -> bool {
        if kind.is_structural() {
            self.structural
        } else {
            self.lexical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    pub format: TokenFormat,
}

/// Rendering of a token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenFormat {
    /// Aligned columns: position, kind, lexeme.
    Table,
    /// One `Kind lexeme` pair per line.
    Simple,
    Json,
}

impl TokenFormat {
    pub const NAMES: [&'static str; 3] = ["table", "simple", "json"];

    pub fn as_str(self) -> &'static str {
        match self {
            TokenFormat::Table => "table",
            TokenFormat::Simple => "simple",
            TokenFormat::Json => "json",
        }
    }
}

impl fmt::Display for TokenFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a format name outside [`TokenFormat::NAMES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTokenFormat(pub String);

impl fmt::Display for UnknownTokenFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown format '{}' (expected one of: {})",
            self.0,
            TokenFormat::NAMES.join(", ")
        )
    }
}

impl std::error::Error for UnknownTokenFormat {}

impl FromStr for TokenFormat {
    type Err = UnknownTokenFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(TokenFormat::Table),
            "simple" => Ok(TokenFormat::Simple),
            "json" => Ok(TokenFormat::Json),
            other => Err(UnknownTokenFormat(other.to_string())),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `folding.tab_size` from a CLI flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<GrishexConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<GrishexConfig, ConfigError> {
    Loader::new().build()
}
