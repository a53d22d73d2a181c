#![forbid(unsafe_code)]

//! Tracing setup.
//!
//! The terminal belongs to the UI, so traces only go somewhere when a log
//! file is configured. The filter comes from `SORTVIZ_LOG` and defaults to
//! `info`.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Result, SortvizError};

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "SORTVIZ_LOG";

const DEFAULT_FILTER: &str = "info";

/// Build the filter from `SORTVIZ_LOG`, falling back to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Open (append) the log file.
pub fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| SortvizError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Install the global subscriber writing to `path`.
///
/// Without a path nothing is installed and tracing macros stay no-ops.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = open_log_file(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| SortvizError::Logging {
            message: err.to_string(),
        })?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_installs_nothing() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn open_log_file_creates_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sortviz.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
        open_log_file(&path).unwrap();
    }

    #[test]
    fn unopenable_path_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("sortviz.log");
        let err = open_log_file(&path).unwrap_err();
        assert!(matches!(err, SortvizError::LogFile { .. }));
        assert!(err.to_string().contains("sortviz.log"));
    }

    #[test]
    #[serial_test::serial]
    fn init_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.log");
        // The global subscriber can only be set once per process; a second
        // attempt must surface as an error rather than a panic.
        match init(Some(&path)) {
            Ok(()) => {
                if std::env::var_os(LOG_ENV).is_none() {
                    let text = std::fs::read_to_string(&path).unwrap();
                    assert!(text.contains("logging initialized"));
                }
                assert!(init(Some(&path)).is_err());
            }
            Err(err) => assert!(matches!(err, SortvizError::Logging { .. })),
        }
    }
}
