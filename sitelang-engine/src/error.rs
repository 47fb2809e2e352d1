//! Engine error types

use sitelang_core::CoreError;
use thiserror::Error;

/// Errors raised while building a detector or running a detection
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid sampler, labeler or probability input
    #[error("core algorithm error: {0}")]
    Core(#[from] CoreError),

    /// The statistical backend cannot discriminate the accepted languages
    #[error("classifier backend covers {supported} accepted language(s), at least 2 required")]
    TooFewLanguages {
        /// Accepted languages the backend knows
        supported: usize,
    },

    /// No classifier was supplied and no default backend is compiled in
    #[error("no language classifier available")]
    NoClassifier,

    /// Window thread pool could not be created
    #[cfg(feature = "parallel")]
    #[error("parallel execution failed: {0}")]
    ParallelError(String),

    /// Invalid detector settings
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// Input could not be read
    #[error("I/O error: {0}")]
    IoError(String),

    /// Input bytes are not UTF-8
    #[error("encoding error: {0}")]
    EncodingError(String),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::IoError(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for EngineError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        EngineError::EncodingError(format!(
            "invalid UTF-8 at byte {}",
            err.utf8_error().valid_up_to()
        ))
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
