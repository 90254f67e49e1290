//! Dashboard configuration.
//!
//! Precedence: command line, then `SURIMON_*` environment variables, then
//! defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::CliOverrides;
use crate::error::{DashError, DashResult};
use crate::logstream::{LogSource, DEFAULT_CAPACITY};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";
pub const DEFAULT_LOG_FILTER: &str = "surimon=info";

pub const ENV_URL: &str = "SURIMON_URL";
pub const ENV_BUFFER_CAPACITY: &str = "SURIMON_BUFFER_CAPACITY";
pub const ENV_SOURCE: &str = "SURIMON_SOURCE";
pub const ENV_REFRESH_SECS: &str = "SURIMON_REFRESH_SECS";
pub const ENV_LOG_FILE: &str = "SURIMON_LOG_FILE";
pub const ENV_LOG_FILTER: &str = "SURIMON_LOG";

/// Settings for one dashboard session.
///
/// ```ignore
/// use surimon::config::DashConfig;
///
/// let config = DashConfig::default()
///     .with_base_url("http://10.0.0.5:5001")
///     .with_buffer_capacity(200);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DashConfig {
    pub base_url: String,
    /// Lines kept in the live log
    pub buffer_capacity: usize,
    /// Source tailed at startup; none waits for the operator
    pub initial_source: Option<LogSource>,
    /// Periodic chart refresh; none refreshes only on demand
    pub refresh_interval: Option<Duration>,
    /// Diagnostic log file; none uses `~/.surimon/surimon.log`
    pub log_file: Option<PathBuf>,
    /// `tracing` filter directives
    pub log_filter: String,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            buffer_capacity: DEFAULT_CAPACITY,
            initial_source: None,
            refresh_interval: None,
            log_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> DashResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| DashError::Config(format!("{} must be a number, got '{}'", name, value)))
}

impl DashConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn with_initial_source(mut self, source: Option<LogSource>) -> Self {
        self.initial_source = source;
        self
    }

    /// Zero seconds disables periodic refresh.
    pub fn with_refresh_secs(mut self, secs: u64) -> Self {
        self.refresh_interval = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Defaults overlaid with whatever `SURIMON_*` variables are set.
    pub fn from_env() -> DashResult<Self> {
        let mut config = Self::default();

        if let Some(url) = env_value(ENV_URL) {
            config = config.with_base_url(url.trim());
        }
        if let Some(value) = env_value(ENV_BUFFER_CAPACITY) {
            config = config.with_buffer_capacity(parse_env(ENV_BUFFER_CAPACITY, &value)?);
        }
        if let Some(value) = env_value(ENV_SOURCE) {
            let source = value
                .parse::<LogSource>()
                .map_err(|e| DashError::Config(format!("{}: {}", ENV_SOURCE, e)))?;
            config = config.with_initial_source(Some(source));
        }
        if let Some(value) = env_value(ENV_REFRESH_SECS) {
            config = config.with_refresh_secs(parse_env(ENV_REFRESH_SECS, &value)?);
        }
        if let Some(path) = env_value(ENV_LOG_FILE) {
            config = config.with_log_file(path);
        }
        if let Some(filter) = env_value(ENV_LOG_FILTER) {
            config = config.with_log_filter(filter);
        }

        Ok(config)
    }

    /// Apply command-line overrides on top of this config.
    pub fn apply_overrides(mut self, overrides: &CliOverrides) -> Self {
        if let Some(url) = &overrides.url {
            self = self.with_base_url(url.clone());
        }
        if let Some(capacity) = overrides.capacity {
            self = self.with_buffer_capacity(capacity);
        }
        if overrides.source.is_some() {
            self = self.with_initial_source(overrides.source);
        }
        if let Some(secs) = overrides.refresh_secs {
            self = self.with_refresh_secs(secs);
        }
        if let Some(path) = &overrides.log_file {
            self = self.with_log_file(path.clone());
        }
        self
    }

    pub fn validate(&self) -> DashResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(DashError::Config(format!(
                "backend URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.buffer_capacity == 0 {
            return Err(DashError::Config(
                "live log capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Where diagnostics go.
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(".surimon")
                .join("surimon.log")
        })
    }
}
