//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Detection error from the library
    DetectionError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::DetectionError(msg) => write!(f, "Detection error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<sitelang_api::ApiError> for CliError {
    fn from(err: sitelang_api::ApiError) -> Self {
        match err {
            sitelang_api::ApiError::Config(msg) => CliError::ConfigError(msg),
            other => CliError::DetectionError(other.to_string()),
        }
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CliError::FileNotFound("page.html".to_string()).to_string(),
            "File not found: page.html"
        );
        assert_eq!(
            CliError::InvalidPattern("[invalid".to_string()).to_string(),
            "Invalid file pattern: [invalid"
        );
        assert_eq!(
            CliError::ConfigError("bad preset".to_string()).to_string(),
            "Configuration error: bad preset"
        );
        assert_eq!(
            CliError::DetectionError("boom".to_string()).to_string(),
            "Detection error: boom"
        );
    }

    #[test]
    fn test_from_api_error() {
        let err: CliError = sitelang_api::ApiError::Config("threads".to_string()).into();
        assert!(matches!(err, CliError::ConfigError(_)));

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err: CliError = sitelang_api::ApiError::Io(io).into();
        assert!(err.to_string().starts_with("Detection error:"));
    }

    #[test]
    fn test_cli_result_wraps_cli_error() {
        let failure: CliResult<()> = Err(CliError::FileNotFound("x".to_string()).into());
        let err = failure.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }
}
