//! Tracing subscriber setup.
//!
//! The terminal UI owns stdout/stderr while it runs, so it logs to a file
//! through a non-blocking appender. Headless commands log to stderr.

use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Default log file used by the terminal UI.
pub fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("todo.log")
}

/// Build the level filter. `RUST_LOG` takes precedence over `level`.
pub fn build_filter(level: &str) -> Result<EnvFilter, AppError> {
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    EnvFilter::try_new(&directives).map_err(|e| AppError::Logging(format!("invalid log level '{directives}': {e}")))
}

/// Install the global subscriber.
///
/// The returned guard must be kept alive for as long as file logging is
/// needed; dropping it flushes pending lines.
pub fn init_tracing(level: &str, target: LogTarget) -> Result<Option<WorkerGuard>, AppError> {
    let filter = build_filter(level)?;

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init()
                .map_err(|e| AppError::Logging(e.to_string()))?;
            Ok(None)
        }
        LogTarget::File(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| AppError::Logging(format!("not a file path: {}", path.display())))?;
            std::fs::create_dir_all(dir)?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| AppError::Logging(e.to_string()))?;
            Ok(Some(guard))
        }
    }
}
