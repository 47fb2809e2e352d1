//! Window sampling
//!
//! Splits a word sequence into a bounded number of fixed-length, possibly
//! overlapping windows. Start offsets depend only on the word count:
//!
//! - up to `W` words: one window at offset 0
//! - fewer than `W + N` words: every offset `0..n-W` (sliding, step 1)
//! - otherwise: exactly `N` offsets spaced `floor((n - W) / N)` apart
//!
//! so long documents cost a constant number of windows while short ones are
//! examined exhaustively.

use crate::error::{CoreError, Result};
use crate::label::Label;
use crate::probabilities::LanguageProbabilities;

/// Default window length in words
pub const DEFAULT_WINDOW_WORDS: usize = 20;

/// Default number of windows sampled from long documents
pub const DEFAULT_SAMPLE_COUNT: usize = 20;

/// Sampling regime chosen for a given word count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingTier {
    /// No words, no windows
    Empty,
    /// Whole document fits in a single window
    Single,
    /// Every start offset is examined
    Sliding,
    /// Offsets spread uniformly across the document
    Strided {
        /// Distance between consecutive offsets (always > 0)
        step: usize,
    },
}

/// Deterministic window sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSampler {
    window_words: usize,
    sample_count: usize,
}

impl Default for WindowSampler {
    fn default() -> Self {
        Self {
            window_words: DEFAULT_WINDOW_WORDS,
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

impl WindowSampler {
    /// Create a sampler with window length `window_words` and target
    /// `sample_count`; both must be non-zero
    pub fn new(window_words: usize, sample_count: usize) -> Result<Self> {
        if window_words == 0 {
            return Err(CoreError::InvalidWindowLength);
        }
        if sample_count == 0 {
            return Err(CoreError::InvalidSampleCount);
        }
        Ok(Self {
            window_words,
            sample_count,
        })
    }

    /// Window length in words
    pub fn window_words(&self) -> usize {
        self.window_words
    }

    /// Target number of windows for long documents
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Sampling regime for `word_count` words
    pub fn tier(&self, word_count: usize) -> SamplingTier {
        let w = self.window_words;
        let n = self.sample_count;

        if word_count == 0 {
            SamplingTier::Empty
        } else if word_count <= w {
            SamplingTier::Single
        } else if w.checked_add(n).map_or(true, |limit| word_count < limit) {
            SamplingTier::Sliding
        } else {
            // word_count - w >= n, so the step is at least one
            SamplingTier::Strided {
                step: (word_count - w) / n,
            }
        }
    }

    /// Window start offsets for `word_count` words, ascending
    pub fn offsets(&self, word_count: usize) -> Vec<usize> {
        match self.tier(word_count) {
            SamplingTier::Empty => Vec::new(),
            SamplingTier::Single => vec![0],
            SamplingTier::Sliding => (0..word_count - self.window_words).collect(),
            SamplingTier::Strided { step } => (0..self.sample_count).map(|k| k * step).collect(),
        }
    }

    /// Cut `words` into window texts
    pub fn sample(&self, words: &[&str]) -> Vec<WindowText> {
        self.offsets(words.len())
            .into_iter()
            .map(|start| {
                let end = (start + self.window_words).min(words.len());
                WindowText {
                    start_offset: start,
                    text: words[start..end].join(" "),
                }
            })
            .collect()
    }
}

/// Split text into the word sequence the sampler works on
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Text of a sampled window, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowText {
    /// Index of the first word in the document
    pub start_offset: usize,
    /// Words of the window joined by single spaces
    pub text: String,
}

/// Fully classified window
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Window {
    /// Index of the first word in the document
    pub start_offset: usize,
    /// Words of the window joined by single spaces
    pub text: String,
    /// Classifier output, `None` if the classifier gave up
    pub probabilities: Option<LanguageProbabilities>,
    /// Verdict assigned by the labeler
    pub label: Label,
}
