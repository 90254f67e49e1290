//! Diagnostic logging.
//!
//! The terminal belongs to the dashboard, so `tracing` output goes to a file
//! instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::DashConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured filter.
///
/// Returns an error if the log file cannot be opened. Calling it twice is
/// harmless; the second subscriber is ignored.
pub fn init_logging(config: &DashConfig) -> std::io::Result<()> {
    let path = config.log_path();
    let file = open_log_file(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER));

    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();

    tracing::info!(path = %path.display(), backend = %config.base_url, "surimon starting");
    Ok(())
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("surimon.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
