use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Builder for the process-wide log subscriber.
///
/// Logs go to stderr so they never mix with the diff on stdout.
pub struct TelemetryBuilder {
    service_name: String,
    log_level: String,
    json: bool,
}

impl TelemetryBuilder {
    /// Creates a builder with a `warn` default level and text output.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            log_level: "warn".to_string(),
            json: false,
        }
    }

    /// Sets the filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Switches between JSON and text log lines.
    #[must_use]
    pub fn with_json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Returns the filter directive `init` falls back to.
    #[must_use]
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Installs the subscriber.
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback directive is invalid or a global
    /// subscriber is already installed.
    pub fn init(self) -> Result<()> {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&self.log_level)
                .with_context(|| format!("Invalid log level: {}", self.log_level))?,
        };

        let fmt_layer = if self.json {
            fmt::layer().json().with_writer(std::io::stderr).boxed()
        } else {
            fmt::layer().with_target(false).with_writer(std::io::stderr).boxed()
        };

        Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .context("Failed to init subscriber")?;

        debug!(service = %self.service_name, json = self.json, "telemetry initialised");
        Ok(())
    }
}

/// Maps `-v` occurrences onto a filter directive.
#[must_use]
pub fn verbosity_level(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = TelemetryBuilder::new("zdiff");
        assert_eq!(builder.log_level(), "warn");
        assert!(!builder.json);
    }

    #[test]
    fn test_builder_overrides() {
        let builder = TelemetryBuilder::new("zdiff").with_log_level("debug").with_json(true);
        assert_eq!(builder.log_level(), "debug");
        assert!(builder.json);
    }

    #[test]
    fn test_verbosity_level() {
        assert_eq!(verbosity_level(0, "error"), "error");
        assert_eq!(verbosity_level(1, "error"), "info");
        assert_eq!(verbosity_level(2, "error"), "debug");
        assert_eq!(verbosity_level(9, "error"), "trace");
    }
}
