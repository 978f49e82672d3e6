//! Top-level error type for the `hunkview` binary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort startup or the event loop.
///
/// Config problems never show up here: they are logged and replaced by defaults
/// (see [`crate::config::load_or_default`]).
#[derive(Debug, Error)]
pub enum AppError {
    /// Terminal setup, drawing or teardown failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The path given on the command line is not inside a git repository.
    #[error("git error: {0}")]
    Git(#[from] git2::Error),
}

/// Why the file logger could not be started. Not fatal: the app runs without logs.
#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("cannot create log file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("a logger is already installed: {0}")]
    Install(#[from] log::SetLoggerError),
}
