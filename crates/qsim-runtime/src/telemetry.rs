//! Tracing setup for binaries.
//!
//! Library code only emits `tracing` events inside the spans it is given;
//! installing a subscriber is left to the executable.

use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable console output (for development).
    Console,
    /// JSON structured logging.
    Json,
}

/// Tracing configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Log level filter (e.g., "info", "qsim_runtime=debug").
    pub log_level: String,
    /// Output format (console or JSON).
    pub format: TracingFormat,
    /// Service name reported at startup.
    pub service_name: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: TracingFormat::Console,
            service_name: "qsim".to_string(),
        }
    }
}

impl TracingConfig {
    /// Create config from environment variables.
    ///
    /// Environment variables:
    /// - `RUST_LOG`: Log level (default: "info")
    /// - `QSIM_LOG_FORMAT`: "console" or "json" (default: "console")
    /// - `QSIM_SERVICE_NAME`: Service name (default: "qsim")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            format: match lookup("QSIM_LOG_FORMAT").as_deref() {
                Some("json") => TracingFormat::Json,
                _ => TracingFormat::Console,
            },
            service_name: lookup("QSIM_SERVICE_NAME").unwrap_or(defaults.service_name),
        }
    }

    /// Install the global subscriber.
    ///
    /// Fails if a global subscriber is already set.
    pub fn init(&self) -> Result<(), TryInitError> {
        let env_filter = EnvFilter::try_new(&self.log_level)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let fmt_layer = match self.format {
            TracingFormat::Console => fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .boxed(),
            TracingFormat::Json => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        info!(service = %self.service_name, format = ?self.format, "tracing initialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TracingConfig::from_lookup(|_| None);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.format, TracingFormat::Console);
        assert_eq!(config.service_name, "qsim");
    }

    #[test]
    fn test_lookup_overrides() {
        let config = TracingConfig::from_lookup(|key| match key {
            "RUST_LOG" => Some("qsim_runtime=debug".to_string()),
            "QSIM_LOG_FORMAT" => Some("json".to_string()),
            _ => None,
        });
        assert_eq!(config.log_level, "qsim_runtime=debug");
        assert_eq!(config.format, TracingFormat::Json);
    }
}
