//! Log subscriber for the `credflow` binary.

use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    /// Neither `RUST_LOG` nor the configured filter parsed.
    InvalidFilter { value: String, source: ParseError },
    /// A global subscriber is already installed.
    Install(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { value, .. } => {
                write!(f, "invalid log filter '{value}' (try CREDFLOW_LOG=warn)")
            }
            TelemetryError::Install(err) => write!(f, "cannot install log subscriber: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::Install(err) => Some(&**err),
        }
    }
}

/// Pick the filter: a parseable, non-blank `rust_log` wins, otherwise
/// `fallback` must parse.
pub fn build_filter(rust_log: Option<&str>, fallback: &str) -> Result<EnvFilter, TelemetryError> {
    if let Some(filter) = rust_log
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
    {
        return Ok(filter);
    }
    EnvFilter::try_new(fallback).map_err(|source| TelemetryError::InvalidFilter {
        value: fallback.to_string(),
        source,
    })
}

/// Install the global subscriber, writing compact lines to stderr so stdout
/// carries only command output.
pub fn init(fallback_filter: &str) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), fallback_filter)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}

#[cfg(test)]
#[path = "telemetry_tests.rs"]
mod tests;
