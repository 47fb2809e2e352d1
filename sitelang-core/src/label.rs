//! Window labeling
//!
//! Reduces a window's probability distribution to one verdict.

use crate::error::{CoreError, Result};
use crate::probabilities::LanguageProbabilities;
use crate::tags::LanguageTag;
use std::fmt;

/// Minimum probability a language must strictly exceed to label a window
pub const DEFAULT_THRESHOLD: f64 = 0.95;

/// Key used for windows without a confident language
pub const UNKNOWN_LABEL: &str = "unk";

/// Verdict for a single window
///
/// Ordering puts languages (alphabetically) before [`Label::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// Confidently identified language
    Language(LanguageTag),
    /// No language cleared the threshold
    Unknown,
}

impl Label {
    /// String form, `"unk"` for [`Label::Unknown`]
    pub fn as_str(&self) -> &str {
        match self {
            Label::Language(tag) => tag.as_str(),
            Label::Unknown => UNKNOWN_LABEL,
        }
    }

    /// The language, if known
    pub fn language(&self) -> Option<&LanguageTag> {
        match self {
            Label::Language(tag) => Some(tag),
            Label::Unknown => None,
        }
    }

    /// Whether this is the unknown bucket
    pub fn is_unknown(&self) -> bool {
        matches!(self, Label::Unknown)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LanguageTag> for Label {
    fn from(tag: LanguageTag) -> Self {
        Label::Language(tag)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Label {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Threshold-based labeler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowLabeler {
    threshold: f64,
}

impl Default for WindowLabeler {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl WindowLabeler {
    /// Create a labeler; `threshold` must lie in `[0, 1]`
    pub fn new(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(CoreError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    /// Configured threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Label one window
    ///
    /// The single most probable language wins if its probability is strictly
    /// greater than the threshold. A shared maximum, a sub-threshold maximum or
    /// a missing distribution all give [`Label::Unknown`].
    pub fn label(&self, probabilities: Option<&LanguageProbabilities>) -> Label {
        let Some(probabilities) = probabilities else {
            return Label::Unknown;
        };

        let mut ranked = probabilities.iter();
        let Some((top, top_p)) = ranked.next() else {
            return Label::Unknown;
        };

        if let Some((_, runner_up)) = ranked.next() {
            if runner_up == top_p {
                return Label::Unknown;
            }
        }

        if top_p > self.threshold {
            Label::Language(top.clone())
        } else {
            Label::Unknown
        }
    }
}
