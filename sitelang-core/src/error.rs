//! Core error types (deterministic only)

use std::fmt;

/// Core algorithm errors (no I/O, no external failures)
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Window length of zero words
    InvalidWindowLength,
    /// Sample count of zero windows
    InvalidSampleCount,
    /// Confidence threshold outside `[0, 1]`
    InvalidThreshold(f64),
    /// A classifier reported a probability that is not in `[0, 1]`
    InvalidProbability {
        /// Language code the value was reported for
        code: String,
        /// The offending value
        value: f64,
    },
    /// A classifier reported more than a unit of probability mass
    ProbabilityMassExceeded {
        /// Sum of all reported values
        total: f64,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidWindowLength => write!(f, "window length must be at least one word"),
            CoreError::InvalidSampleCount => write!(f, "sample count must be at least one window"),
            CoreError::InvalidThreshold(value) => {
                write!(f, "confidence threshold {value} is outside [0, 1]")
            }
            CoreError::InvalidProbability { code, value } => {
                write!(f, "probability {value} reported for '{code}' is outside [0, 1]")
            }
            CoreError::ProbabilityMassExceeded { total } => {
                write!(f, "reported probabilities sum to {total}, expected at most 1")
            }
        }
    }
}

impl std::error::Error for CoreError {}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CoreError::InvalidWindowLength.to_string(),
            "window length must be at least one word"
        );
        assert_eq!(
            CoreError::InvalidThreshold(1.5).to_string(),
            "confidence threshold 1.5 is outside [0, 1]"
        );

        let err = CoreError::InvalidProbability {
            code: "en".to_string(),
            value: -0.2,
        };
        assert!(err.to_string().contains("'en'"));
    }
}
