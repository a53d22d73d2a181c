#![forbid(unsafe_code)]

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SortvizError>;

#[derive(Debug, Error)]
pub enum SortvizError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

impl SortvizError {
    /// Process exit code: 2 for usage errors, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
