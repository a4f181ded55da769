//! Tracing setup
//!
//! Installs the global `tracing` subscriber for the gateway client. Event
//! filtering is controlled by `RUST_LOG`; the line format by
//! `DISCORD_LOG_FORMAT` (`text` for terminals, `json` for log shippers).

use std::env;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable selecting the log line format
pub const LOG_FORMAT_VAR: &str = "DISCORD_LOG_FORMAT";

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// Read the format from [`LOG_FORMAT_VAR`]; unset or unrecognized
    /// values fall back to text
    #[must_use]
    pub fn from_env() -> Self {
        env::var(LOG_FORMAT_VAR)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Install the global subscriber, reading format and filter from the
/// environment
///
/// # Errors
/// Returns an error when a subscriber is already installed.
pub fn try_init_tracing() -> Result<(), TelemetryError> {
    try_init_tracing_with(LogFormat::from_env())
}

/// Install the global subscriber with an explicit format
///
/// The filter comes from `RUST_LOG`, defaulting to `info`.
///
/// # Errors
/// Returns an error when a subscriber is already installed.
pub fn try_init_tracing_with(format: LogFormat) -> Result<(), TelemetryError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => subscriber.with(fmt::layer()).try_init(),
        LogFormat::Json => subscriber.with(fmt::layer().json()).try_init(),
    }
    .map_err(|_| TelemetryError::SubscriberInstalled)
}

/// Telemetry setup errors
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("a tracing subscriber is already installed")]
    SubscriberInstalled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("logfmt".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_format_defaults_to_text() {
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }

    // try_init_tracing itself is exercised by the binary; the global
    // subscriber can only be installed once per process, so unit tests
    // stay away from it.
}
