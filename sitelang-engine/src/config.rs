//! Configuration types for the engine

use crate::ExecutionMode;
use sitelang_core::{
    AggregationMode, AggregationOptions, ClassifierConfig, SeedPolicy, DEFAULT_SAMPLE_COUNT,
    DEFAULT_THRESHOLD, DEFAULT_TRIALS, DEFAULT_WINDOW_WORDS,
};

/// Execution settings for window classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Execution mode selector
    pub execution_mode: ExecutionMode,
    /// Number of threads for parallel execution (None = rayon's global pool)
    pub threads: Option<usize>,
    /// Minimum number of windows before adaptive mode goes parallel
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Adaptive,
            threads: None,
            parallel_threshold: 8,
        }
    }
}

impl EngineConfig {
    /// Always classify windows on the calling thread
    pub fn sequential() -> Self {
        Self {
            execution_mode: ExecutionMode::Sequential,
            threads: Some(1),
            parallel_threshold: usize::MAX,
        }
    }

    /// Always fan windows out across threads
    pub fn parallel(threads: Option<usize>) -> Self {
        Self {
            execution_mode: ExecutionMode::Parallel,
            threads,
            parallel_threshold: 0,
        }
    }
}

/// Full detector configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Words per window
    pub window_words: usize,
    /// Windows sampled from long documents
    pub sample_count: usize,
    /// Probability a window's top language must strictly exceed
    pub threshold: f64,
    /// Counts or shares, with or without unknown
    pub aggregation: AggregationOptions,
    /// Trials and seed policy handed to the classifier
    pub classifier: ClassifierConfig,
    /// Keep per-window records in the output
    pub keep_windows: bool,
    /// Execution settings
    pub engine: EngineConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_words: DEFAULT_WINDOW_WORDS,
            sample_count: DEFAULT_SAMPLE_COUNT,
            threshold: DEFAULT_THRESHOLD,
            aggregation: AggregationOptions::default(),
            classifier: ClassifierConfig::default(),
            keep_windows: false,
            engine: EngineConfig::default(),
        }
    }
}

impl DetectorConfig {
    /// Fewer windows and trials, for bulk crawls
    pub fn fast() -> Self {
        Self {
            sample_count: 10,
            classifier: ClassifierConfig {
                trials: 5,
                seed: SeedPolicy::default(),
            },
            ..Self::default()
        }
    }

    /// Same as the default
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Twice the windows and trials of the default
    pub fn thorough() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT * 2,
            classifier: ClassifierConfig {
                trials: DEFAULT_TRIALS * 2,
                seed: SeedPolicy::default(),
            },
            ..Self::default()
        }
    }

    /// Raw window counts instead of shares
    pub fn counts(mut self) -> Self {
        self.aggregation.mode = AggregationMode::Counts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_core_constants() {
        let config = DetectorConfig::default();
        assert_eq!(config.window_words, 20);
        assert_eq!(config.sample_count, 20);
        assert_eq!(config.threshold, 0.95);
        assert_eq!(config.classifier.trials, 20);
        assert_eq!(config.classifier.seed, SeedPolicy::Fixed(0));
        assert!(config.aggregation.include_unknown);
        assert_eq!(config.aggregation.mode, AggregationMode::Shares);
    }

    #[test]
    fn test_presets() {
        assert_eq!(DetectorConfig::fast().classifier.trials, 5);
        assert_eq!(DetectorConfig::thorough().sample_count, 40);
        assert_eq!(DetectorConfig::balanced(), DetectorConfig::default());
        assert_eq!(
            DetectorConfig::default().counts().aggregation.mode,
            AggregationMode::Counts
        );
        assert_eq!(
            EngineConfig::sequential().execution_mode,
            ExecutionMode::Sequential
        );
    }
}
