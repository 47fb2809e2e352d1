//! Pure windowed language-distribution algorithm
//!
//! This crate holds the deterministic parts of site language detection:
//! accepted language tags and metadata tag parsing, the probability contract
//! for per-window classifiers, window sampling, threshold labeling and
//! aggregation into a document-level distribution. It performs no I/O and
//! does not own a classifier; see [`LanguageClassifier`].

#![warn(missing_docs)]

pub mod classifier;
pub mod distribution;
pub mod error;
pub mod label;
pub mod probabilities;
pub mod tags;
pub mod window;

pub use classifier::{
    ClassifierConfig, LanguageClassifier, SeedPolicy, TrialConfig, DEFAULT_SEED, DEFAULT_TRIALS,
};
pub use distribution::{AggregationMode, AggregationOptions, Distribution, DistributionAggregator};
pub use error::{CoreError, Result};
pub use label::{Label, WindowLabeler, DEFAULT_THRESHOLD, UNKNOWN_LABEL};
pub use probabilities::{LanguageProbabilities, MASS_TOLERANCE};
pub use tags::{parse_lang_tags, AcceptedLanguages, LanguageTag, KNOWN_LANG_TAGS};
pub use window::{
    split_words, SamplingTier, Window, WindowSampler, WindowText, DEFAULT_SAMPLE_COUNT,
    DEFAULT_WINDOW_WORDS,
};
