use grishex_config::ConfigError;
use std::fmt;
use std::io;

/// Failures that stop a command. Problems in the scanned text are diagnostics, not errors.
#[derive(Debug)]
pub enum CliError {
    Io { path: String, source: io::Error },
    Config(ConfigError),
    Serialize(serde_json::Error),
    UnknownFormat(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io { path, source } => write!(f, "cannot read {}: {}", path, source),
            CliError::Config(err) => write!(f, "invalid configuration: {}", err),
            CliError::Serialize(err) => write!(f, "cannot serialize output: {}", err),
            CliError::UnknownFormat(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io { source, .. } => Some(source),
            CliError::Config(err) => Some(err),
            CliError::Serialize(err) => Some(err),
            CliError::UnknownFormat(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialize(err)
    }
}
