//! Error types for the connection harness

use std::io;
use thiserror::Error;

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error type accepted from caller-supplied test routines
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for harness operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Timeout occurred
    #[error("Operation timed out")]
    Timeout,

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Connection closed
    #[error("Connection closed")]
    ConnectionClosed,

    /// The caller-supplied test routine failed
    #[error("Test routine failed: {0}")]
    Routine(#[source] BoxError),

    /// A release failed while another error was already pending.
    ///
    /// Carries both errors so neither is lost. The pending error is the
    /// primary one and is reachable through `source()`.
    #[error("{pending} (release also failed: {release})")]
    TeardownAfterError {
        /// The error that was pending when release ran
        #[source]
        pending: Box<Error>,
        /// The error raised by the release itself
        release: Box<Error>,
    },
}

impl Error {
    /// Wrap an arbitrary routine error
    pub fn routine<E: Into<BoxError>>(err: E) -> Self {
        Error::Routine(err.into())
    }
}
