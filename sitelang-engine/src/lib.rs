//! Windowed language detection engine
//!
//! This crate runs the sitelang core algorithm end to end: it samples windows
//! from a document, classifies them (sequentially or across a rayon pool),
//! labels and aggregates the verdicts. The default classifier is backed by
//! lingua.

#![warn(missing_docs)]

pub mod config;
pub mod detector;
pub mod error;
pub mod executor;
pub mod input;
#[cfg(feature = "lingua")]
pub mod backend;

// Re-export key types
pub use config::{DetectorConfig, EngineConfig};
pub use detector::{Detection, DetectionMetadata, WindowedDetector, WindowedDetectorBuilder};
pub use error::{EngineError, Result};
pub use executor::{ExecutionMode, Executor};
pub use input::Input;
#[cfg(feature = "lingua")]
pub use backend::{lingua_tag, LinguaClassifier};

// Re-export from core for convenience
pub use sitelang_core::{
    AcceptedLanguages, AggregationMode, AggregationOptions, Distribution, Label,
    LanguageClassifier, LanguageProbabilities, LanguageTag, SamplingTier, SeedPolicy, TrialConfig,
    Window, KNOWN_LANG_TAGS, UNKNOWN_LABEL,
};
