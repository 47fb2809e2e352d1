//! High-level configuration API

use crate::dto::ExecutionMode;
use crate::error::{ApiError, Result};
use crate::PageAnalyzer;
use sitelang_engine::{AcceptedLanguages, AggregationMode, DetectorConfig, SeedPolicy};

/// High-level configuration for page analysis
#[derive(Debug, Clone)]
pub struct Config {
    detector: DetectorConfig,
    accepted: AcceptedLanguages,
    low_accuracy: bool,
    strip_urls: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            accepted: AcceptedLanguages::default(),
            low_accuracy: false,
            strip_urls: true,
        }
    }
}

impl Config {
    /// Fewer windows and trials, low-accuracy classifier
    pub fn fast() -> Self {
        Self {
            detector: DetectorConfig::fast(),
            low_accuracy: true,
            ..Self::default()
        }
    }

    /// The default settings
    pub fn balanced() -> Self {
        Self::default()
    }

    /// More windows and trials
    pub fn thorough() -> Self {
        Self {
            detector: DetectorConfig::thorough(),
            ..Self::default()
        }
    }

    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Detector settings
    pub fn detector(&self) -> &DetectorConfig {
        &self.detector
    }

    /// Languages the analyzer may report
    pub fn accepted(&self) -> &AcceptedLanguages {
        &self.accepted
    }

    /// Whether the classifier runs in low accuracy mode
    pub fn low_accuracy(&self) -> bool {
        self.low_accuracy
    }

    /// Whether links are removed from text before detection
    pub fn strip_urls(&self) -> bool {
        self.strip_urls
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Restrict the accepted languages
    pub fn languages<I, S>(mut self, codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let accepted = AcceptedLanguages::new(codes);
        if accepted.is_empty() {
            return Err(ApiError::Config(
                "at least one language code is required".to_string(),
            ));
        }
        self.config.accepted = accepted;
        Ok(self)
    }

    /// Set thread count
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.config.detector.engine.threads = threads;
        self
    }

    /// Set execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.detector.engine.execution_mode = mode.into();
        self
    }

    /// Words per window
    pub fn window_words(mut self, words: usize) -> Self {
        self.config.detector.window_words = words;
        self
    }

    /// Windows sampled from long documents
    pub fn sample_count(mut self, count: usize) -> Self {
        self.config.detector.sample_count = count;
        self
    }

    /// Probability a window's top language must exceed
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.detector.threshold = threshold;
        self
    }

    /// Classifier trials per window
    pub fn trials(mut self, trials: usize) -> Self {
        self.config.detector.classifier.trials = trials;
        self
    }

    /// Fixed classifier seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.detector.classifier.seed = SeedPolicy::Fixed(seed);
        self
    }

    /// Fresh seed per call
    pub fn randomized(mut self) -> Self {
        self.config.detector.classifier.seed = SeedPolicy::Randomized;
        self
    }

    /// Report window counts instead of shares
    pub fn counts(mut self) -> Self {
        self.config.detector.aggregation.mode = AggregationMode::Counts;
        self
    }

    /// Whether the unknown bucket is reported
    pub fn include_unknown(mut self, include: bool) -> Self {
        self.config.detector.aggregation.include_unknown = include;
        self
    }

    /// Keep per-window records
    pub fn keep_windows(mut self, keep: bool) -> Self {
        self.config.detector.keep_windows = keep;
        self
    }

    /// Use the low accuracy classifier
    pub fn low_accuracy(mut self, low_accuracy: bool) -> Self {
        self.config.low_accuracy = low_accuracy;
        self
    }

    /// Remove links from text before detection (on by default)
    pub fn strip_urls(mut self, strip: bool) -> Self {
        self.config.strip_urls = strip;
        self
    }

    /// Use fast settings
    pub fn fast(mut self) -> Self {
        self.config.detector = DetectorConfig::fast();
        self.config.low_accuracy = true;
        self
    }

    /// Use thorough settings
    pub fn thorough(mut self) -> Self {
        self.config.detector = DetectorConfig::thorough();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        let detector = &self.config.detector;
        if detector.window_words == 0 {
            return Err(ApiError::Config("window length must be at least 1".to_string()));
        }
        if detector.sample_count == 0 {
            return Err(ApiError::Config("sample count must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&detector.threshold) {
            return Err(ApiError::Config(format!(
                "threshold {} is outside [0, 1]",
                detector.threshold
            )));
        }
        if detector.classifier.trials == 0 {
            return Err(ApiError::Config("trials must be at least 1".to_string()));
        }
        if detector.engine.threads == Some(0) {
            return Err(ApiError::Config("thread count must be at least 1".to_string()));
        }

        Ok(self.config)
    }

    /// Build a page analyzer directly
    pub fn build_analyzer(self) -> Result<PageAnalyzer> {
        PageAnalyzer::with_config(self.build()?)
    }
}
