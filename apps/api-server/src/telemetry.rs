//! Logging setup: one `tracing` subscriber for the whole process, configured
//! from `LOG_FORMAT` and `RUST_LOG`.

use std::str::FromStr;

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt};

/// Filter used when `RUST_LOG` is unset or does not parse.
pub const DEFAULT_FILTER: &str = "info,api_server=debug,pinboard_infra=debug";

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human oriented.
    #[default]
    Pretty,
    /// One line per event.
    Compact,
    /// Newline-delimited JSON for log shippers.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "pretty" => Ok(LogFormat::Pretty),
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub format: LogFormat,
    pub filter: String,
    /// Set when `LOG_FORMAT` held something unrecognised; reported once the
    /// subscriber is up.
    rejected_format: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: DEFAULT_FILTER.to_string(),
            rejected_format: None,
        }
    }
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("LOG_FORMAT").ok(),
            std::env::var("RUST_LOG").ok(),
        )
    }

    fn from_vars(format: Option<String>, filter: Option<String>) -> Self {
        let (format, rejected_format) = match format.as_deref().map(LogFormat::from_str) {
            None => (LogFormat::default(), None),
            Some(Ok(format)) => (format, None),
            Some(Err(reason)) => (LogFormat::default(), Some(reason)),
        };

        Self {
            format,
            filter: filter
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            rejected_format,
        }
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TryInitError> {
    let (filter, rejected_filter) = match EnvFilter::try_new(&config.filter) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_FILTER), Some(e)),
    };

    let output: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
        LogFormat::Compact => fmt::layer().compact().boxed(),
        LogFormat::Json => fmt::layer().json().boxed(),
    };

    tracing_subscriber::registry()
        .with(output)
        .with(filter)
        .try_init()?;

    if let Some(reason) = &config.rejected_format {
        tracing::warn!("{}; falling back to pretty output", reason);
    }
    if let Some(e) = rejected_filter {
        tracing::warn!(
            filter = %config.filter,
            error = %e,
            "Invalid log filter; using {}",
            DEFAULT_FILTER
        );
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        format = ?config.format,
        "Logging initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" compact ".parse::<LogFormat>(), Ok(LogFormat::Compact));
        assert_eq!("".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_unknown_format_falls_back_to_pretty() {
        let config = TelemetryConfig::from_vars(Some("xml".into()), None);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.rejected_format.is_some());
        assert_eq!(config.filter, DEFAULT_FILTER);
    }

    #[test]
    fn test_rust_log_overrides_default_filter() {
        let config = TelemetryConfig::from_vars(Some("json".into()), Some("warn".into()));
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.filter, "warn");

        let blank = TelemetryConfig::from_vars(None, Some("  ".into()));
        assert_eq!(blank.filter, DEFAULT_FILTER);
    }
}
