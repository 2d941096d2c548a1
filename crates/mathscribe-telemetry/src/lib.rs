//! # Mathscribe Telemetry
//!
//! Structured logging initialization shared by the binaries.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod logging;

pub use logging::init_logging;

/// Telemetry configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to log output.
    pub service_name: String,
    /// Log level filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Emit JSON-formatted logs.
    pub json_logs: bool,
}

impl TelemetryConfig {
    /// Creates a configuration for the given service.
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Sets the default log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Switches to JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self) -> Self {
        self.json_logs = true;
        self
    }
}
