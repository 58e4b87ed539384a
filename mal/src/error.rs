//! Error handling module for the `mal` CLI.
//!
//! This module provides a structured error type using `thiserror` for the
//! handful of process-startup conditions the binary itself is responsible
//! for. Ordinary reader and evaluation errors never reach this type — they
//! are handled entirely inside `malc_drv::Session`, per the error-as-value
//! design described for the interpreter core.

use thiserror::Error;

/// Errors that can occur while starting the `mal` binary.
#[derive(Error, Debug)]
pub enum MalError {
    /// Logging subsystem failed to initialize.
    #[error("failed to initialize logging: {0}")]
    Logging(String),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `MalError`.
pub type Result<T> = std::result::Result<T, MalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_error_display() {
        let err = MalError::Logging("bad filter directive".to_string());
        assert_eq!(err.to_string(), "failed to initialize logging: bad filter directive");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let mal_err: MalError = io_err.into();
        assert!(matches!(mal_err, MalError::Io(_)));
    }
}
