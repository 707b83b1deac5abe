//! Tracing subscriber setup shared by the grishex binaries.
//!
//! The subscriber is only installed when `GRISHEX_LOG` (or `RUST_LOG`) is set, so normal runs
//! pay nothing. Filters use the `RUST_LOG` syntax:
//!
//! ```bash
//! GRISHEX_LOG=debug grishex check contract.grx
//! GRISHEX_LOG=grishex_lexer=trace GRISHEX_LOG_FORMAT=json grishex-lsp
//! ```
//!
//! Output always goes to stderr. stdout carries command output and LSP JSON-RPC.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

pub const LOG_ENV: &str = "GRISHEX_LOG";
pub const LOG_FORMAT_ENV: &str = "GRISHEX_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_ENV).unwrap_or_default())
    }
}

/// `GRISHEX_LOG` takes precedence over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(value) => EnvFilter::builder().parse_lossy(value),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Installs the global subscriber when logging was requested through the environment.
pub fn init_tracing() {
    if std::env::var(LOG_ENV).is_err() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            // A subscriber installed earlier (e.g. by a test harness) wins
            let _ = Registry::default().with(filter).with(json_layer).try_init();
        }
        LogFormat::Text => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
