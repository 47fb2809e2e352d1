//! Windowed language detector and builder
//!
//! Wires the sampler, a classifier, the labeler and the aggregator into one
//! call: text in, language distribution out.

use crate::{
    config::{DetectorConfig, EngineConfig},
    error::{EngineError, Result},
    executor::{auto_select, ExecutionMode, Executor, SequentialExecutor, WindowJob},
    input::Input,
};
use sitelang_core::{
    split_words, AcceptedLanguages, AggregationMode, ClassifierConfig, Distribution,
    DistributionAggregator, LanguageClassifier, LanguageProbabilities, SamplingTier, SeedPolicy,
    TrialConfig, Window, WindowLabeler, WindowSampler,
};
use std::sync::Arc;
use std::time::Instant;

/// Result of one detection call
#[derive(Debug, Clone)]
pub struct Detection {
    /// Document-level distribution
    pub distribution: Distribution,
    /// Per-window records, when requested
    pub windows: Option<Vec<Window>>,
    /// How the call ran
    pub metadata: DetectionMetadata,
}

/// Processing metadata
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionMetadata {
    /// Words in the document
    pub word_count: usize,
    /// Windows classified
    pub window_count: usize,
    /// Sampling regime chosen for the document
    pub tier: SamplingTier,
    /// Seed the classifier ran with
    pub seed: u64,
    /// Execution mode that was actually used
    pub execution_mode: ExecutionMode,
    /// Processing time in milliseconds
    pub processing_time_ms: f64,
}

/// Windowed language detector
///
/// Cheap to share across threads; every call is independent.
pub struct WindowedDetector {
    classifier: Arc<dyn LanguageClassifier>,
    accepted: AcceptedLanguages,
    sampler: WindowSampler,
    labeler: WindowLabeler,
    aggregator: DistributionAggregator,
    config: DetectorConfig,
}

impl std::fmt::Debug for WindowedDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowedDetector")
            .field("classifier", &self.classifier.name())
            .field("accepted", &self.accepted.len())
            .field("config", &self.config)
            .finish()
    }
}

impl WindowedDetector {
    /// Start building a detector
    pub fn builder() -> WindowedDetectorBuilder {
        WindowedDetectorBuilder::new()
    }

    /// Create a detector with default configuration around `classifier`
    pub fn with_classifier<C>(classifier: C, accepted: AcceptedLanguages) -> Result<Self>
    where
        C: LanguageClassifier + 'static,
    {
        Self::builder()
            .accepted_languages(accepted)
            .classifier(classifier)
            .build()
    }

    /// Configuration in use
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Accepted language set
    pub fn accepted_languages(&self) -> &AcceptedLanguages {
        &self.accepted
    }

    /// Seed and trials for the next call
    pub fn next_trials(&self) -> TrialConfig {
        self.config.classifier.resolve(rand::random::<u64>)
    }

    /// Detect the language distribution of `text`
    pub fn detect(&self, text: &str) -> Result<Detection> {
        self.detect_with(text, self.next_trials())
    }

    /// Detect from any [`Input`]
    pub fn detect_input(&self, input: Input) -> Result<Detection> {
        tracing::debug!(source = %input.describe(), "reading detection input");
        let text = input.into_text()?;
        self.detect(&text)
    }

    /// Detect with explicit trials and seed
    pub fn detect_with(&self, text: &str, trials: TrialConfig) -> Result<Detection> {
        let start = Instant::now();
        let words = split_words(text);
        let tier = self.sampler.tier(words.len());
        let samples = self.sampler.sample(&words);
        let window_count = samples.len();

        let mode = match self.config.engine.execution_mode {
            ExecutionMode::Adaptive => {
                auto_select(window_count, self.config.engine.parallel_threshold)
            }
            mode => mode,
        };

        tracing::debug!(
            words = words.len(),
            windows = window_count,
            ?tier,
            seed = trials.seed,
            mode = mode.as_str(),
            "detecting language distribution"
        );

        let job = WindowJob {
            classifier: self.classifier.as_ref(),
            trials,
            accepted: &self.accepted,
            labeler: self.labeler,
        };
        let windows = executor_for(mode, &self.config.engine)?.classify(samples, &job)?;
        let distribution = self.aggregator.aggregate(windows.iter().map(|w| &w.label));

        tracing::debug!(keys = distribution.len(), "aggregated distribution");

        Ok(Detection {
            distribution,
            windows: self.config.keep_windows.then_some(windows),
            metadata: DetectionMetadata {
                word_count: words.len(),
                window_count,
                tier,
                seed: trials.seed,
                execution_mode: mode,
                processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            },
        })
    }

    /// Classifier probabilities for the whole text, without windowing
    ///
    /// `None` when the text has no words or the classifier gives up.
    pub fn probabilities(&self, text: &str) -> Result<Option<LanguageProbabilities>> {
        if split_words(text).is_empty() {
            return Ok(None);
        }
        let trials = self.next_trials();
        match self.classifier.estimate(text, &trials) {
            Some(raw) => Ok(Some(LanguageProbabilities::from_estimates(
                raw,
                &self.accepted,
            )?)),
            None => Ok(None),
        }
    }
}

fn executor_for(mode: ExecutionMode, engine: &EngineConfig) -> Result<Box<dyn Executor>> {
    match mode {
        ExecutionMode::Sequential | ExecutionMode::Adaptive => Ok(Box::new(SequentialExecutor)),
        #[cfg(feature = "parallel")]
        ExecutionMode::Parallel => Ok(Box::new(crate::executor::ParallelExecutor::new(
            engine.threads,
        ))),
        #[cfg(not(feature = "parallel"))]
        ExecutionMode::Parallel => {
            let _ = engine;
            Err(EngineError::ConfigError(
                "parallel execution requires the 'parallel' feature".to_string(),
            ))
        }
    }
}

/// Builder for [`WindowedDetector`]
///
/// Without an explicit classifier the lingua backend is built over the
/// accepted languages.
pub struct WindowedDetectorBuilder {
    config: DetectorConfig,
    accepted: Option<AcceptedLanguages>,
    classifier: Option<Arc<dyn LanguageClassifier>>,
    low_accuracy: bool,
}

impl Default for WindowedDetectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowedDetectorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: DetectorConfig::default(),
            accepted: None,
            classifier: None,
            low_accuracy: false,
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: DetectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Words per window
    pub fn window_words(mut self, words: usize) -> Self {
        self.config.window_words = words;
        self
    }

    /// Windows sampled from long documents
    pub fn sample_count(mut self, count: usize) -> Self {
        self.config.sample_count = count;
        self
    }

    /// Labeling threshold
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Counts or shares
    pub fn aggregation_mode(mut self, mode: AggregationMode) -> Self {
        self.config.aggregation.mode = mode;
        self
    }

    /// Whether the unknown bucket appears in the output
    pub fn include_unknown(mut self, include: bool) -> Self {
        self.config.aggregation.include_unknown = include;
        self
    }

    /// Classifier trials per window
    pub fn trials(mut self, trials: usize) -> Self {
        self.config.classifier.trials = trials;
        self
    }

    /// Seed policy
    pub fn seed(mut self, seed: SeedPolicy) -> Self {
        self.config.classifier.seed = seed;
        self
    }

    /// Fixed seed (`true`, the default) or a fresh seed per call
    pub fn deterministic(mut self, deterministic: bool) -> Self {
        self.config.classifier.seed = if deterministic {
            match self.config.classifier.seed {
                SeedPolicy::Fixed(seed) => SeedPolicy::Fixed(seed),
                SeedPolicy::Randomized => ClassifierConfig::default().seed,
            }
        } else {
            SeedPolicy::Randomized
        };
        self
    }

    /// Keep per-window records in the output
    pub fn keep_windows(mut self, keep: bool) -> Self {
        self.config.keep_windows = keep;
        self
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.engine.execution_mode = mode;
        self
    }

    /// Set the thread count
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.config.engine.threads = threads;
        self
    }

    /// Restrict output to these languages
    pub fn accepted_languages(mut self, accepted: AcceptedLanguages) -> Self {
        self.accepted = Some(accepted);
        self
    }

    /// Use a custom classifier
    pub fn classifier<C: LanguageClassifier + 'static>(mut self, classifier: C) -> Self {
        self.classifier = Some(Arc::new(classifier));
        self
    }

    /// Use a shared classifier
    pub fn shared_classifier(mut self, classifier: Arc<dyn LanguageClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Build the default lingua backend in low accuracy mode
    pub fn low_accuracy(mut self, low_accuracy: bool) -> Self {
        self.low_accuracy = low_accuracy;
        self
    }

    /// Validate the configuration and build the detector
    pub fn build(self) -> Result<WindowedDetector> {
        let config = self.config;
        if config.engine.threads == Some(0) {
            return Err(EngineError::ConfigError(
                "thread count must be at least 1".to_string(),
            ));
        }

        let sampler = WindowSampler::new(config.window_words, config.sample_count)?;
        let labeler = WindowLabeler::new(config.threshold)?;
        let aggregator = DistributionAggregator::new(config.aggregation);
        let accepted = self.accepted.unwrap_or_default();
        if accepted.is_empty() {
            return Err(EngineError::ConfigError(
                "accepted language set is empty".to_string(),
            ));
        }

        let classifier = match self.classifier {
            Some(classifier) => classifier,
            None => default_classifier(&accepted, self.low_accuracy)?,
        };

        tracing::debug!(classifier = classifier.name(), "built windowed detector");

        Ok(WindowedDetector {
            classifier,
            accepted,
            sampler,
            labeler,
            aggregator,
            config,
        })
    }
}

#[cfg(feature = "lingua")]
fn default_classifier(
    accepted: &AcceptedLanguages,
    low_accuracy: bool,
) -> Result<Arc<dyn LanguageClassifier>> {
    let classifier = if low_accuracy {
        crate::backend::LinguaClassifier::low_accuracy(accepted)?
    } else {
        crate::backend::LinguaClassifier::new(accepted)?
    };
    Ok(Arc::new(classifier))
}

#[cfg(not(feature = "lingua"))]
fn default_classifier(
    _accepted: &AcceptedLanguages,
    _low_accuracy: bool,
) -> Result<Arc<dyn LanguageClassifier>> {
    Err(EngineError::NoClassifier)
}
