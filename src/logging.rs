//! File logging. The terminal belongs to the TUI, so log output goes to
//! `<data_dir>/zenith.log` through a non-blocking writer.
//!
//! The filter defaults to `info` and can be overridden with `ZENITH_LOG`
//! or `RUST_LOG` using the usual `EnvFilter` syntax.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::io::paths;

const FILTER_ENV: &str = "ZENITH_LOG";

/// Keep alive until exit; dropping it flushes buffered log lines.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Install the global subscriber. Failing to open the log file disables
/// file output rather than failing startup.
pub fn init(data_dir: &Path) -> LoggingGuard {
    let log_path = paths::log_file(data_dir);
    let file = fs::create_dir_all(data_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    });

    let (writer, file_guard) = match file {
        Ok(file) => tracing_appender::non_blocking(file),
        Err(_) => tracing_appender::non_blocking(io::sink()),
    };

    let filter = EnvFilter::try_from_env(FILTER_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false);

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();

    tracing::info!(log_path = %log_path.display(), version = env!("CARGO_PKG_VERSION"), "logging initialized");

    LoggingGuard {
        _file_guard: file_guard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_log_file_in_data_dir() {
        let tmp = TempDir::new().unwrap();
        let data_dir = tmp.path().join("nested");
        let guard = init(&data_dir);
        drop(guard);
        assert!(paths::log_file(&data_dir).exists());
    }
}
