//! Global error handling for projdump
//!
//! Per-file read failures (`FileOutcome::Unreadable`) and clipboard failures
//! (`ClipboardStatus::Failed`) are recovered inside a run. The variants here
//! cover what a caller can receive from `ProjectFlattener::run` and
//! `Config::validate`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Global error type for projdump operations
#[derive(Error, Debug)]
pub enum FlattenError {
    /// The dump file could not be created or written
    #[error("Failed to write output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),
}

/// Specialized Result type for projdump operations
pub type Result<T> = std::result::Result<T, FlattenError>;

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error::FlattenError::$error_type(format!($($arg)*)))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
