//! Error types for the parsing and interpreter layers.
//!
//! [`BackendError`] wraps lopdf-level and interpreter-level failures and
//! converts into the crate-public [`SiftError`] for unified handling.

use pdfsift_core::SiftError;
use thiserror::Error;

/// Error type for PDF backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error resolving font or encoding information.
    #[error("font error: {0}")]
    Font(String),

    /// Error during content stream interpretation.
    #[error("interpreter error: {0}")]
    Interpreter(String),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] SiftError),
}

impl From<BackendError> for SiftError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => SiftError::Parse(msg),
            BackendError::Io(e) => SiftError::Io(e.to_string()),
            BackendError::Font(msg) => SiftError::Font(msg),
            BackendError::Interpreter(msg) => SiftError::Interpreter(msg),
            BackendError::Core(e) => e,
        }
    }
}
