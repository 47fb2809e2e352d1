//! Extraction error types
//!
//! Only malformed input shapes are errors. Missing metadata is reported as
//! `None` by the extractors themselves.

use thiserror::Error;

/// Extraction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Header blob is valid JSON but not a list of name/value records
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// Path has more components than the analyzer accepts
    #[error("path has {components} components, limit is {limit}")]
    PathTooLong {
        /// Components found
        components: usize,
        /// Maximum accepted
        limit: usize,
    },
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
