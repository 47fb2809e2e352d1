//! Execution strategies for window classification
//!
//! Windows are independent, so executors only differ in where the work runs.
//! Results always come back in window order.

use crate::error::Result;
use sitelang_core::{
    AcceptedLanguages, LanguageClassifier, LanguageProbabilities, TrialConfig, Window,
    WindowLabeler, WindowText,
};

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Single-threaded sequential processing
    Sequential,
    /// Multi-threaded parallel processing
    Parallel,
    /// Pick per call from the window count
    #[default]
    Adaptive,
}

impl ExecutionMode {
    /// Lowercase name used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
            ExecutionMode::Adaptive => "adaptive",
        }
    }
}

/// Everything needed to turn one sampled window into a labeled [`Window`]
pub struct WindowJob<'a> {
    /// Probability estimator
    pub classifier: &'a dyn LanguageClassifier,
    /// Call-scoped trials and seed
    pub trials: TrialConfig,
    /// Codes allowed in the output
    pub accepted: &'a AcceptedLanguages,
    /// Threshold labeler
    pub labeler: WindowLabeler,
}

impl WindowJob<'_> {
    /// Classify and label a single window
    pub fn run(&self, window: WindowText) -> Result<Window> {
        let probabilities = match self.classifier.estimate(&window.text, &self.trials) {
            Some(raw) => Some(LanguageProbabilities::from_estimates(raw, self.accepted)?),
            None => None,
        };
        let label = self.labeler.label(probabilities.as_ref());

        tracing::trace!(
            offset = window.start_offset,
            label = label.as_str(),
            "classified window"
        );

        Ok(Window {
            start_offset: window.start_offset,
            text: window.text,
            probabilities,
            label,
        })
    }
}

/// Trait for execution strategies
pub trait Executor: Send + Sync {
    /// Classify windows, returning them in input order
    fn classify(&self, windows: Vec<WindowText>, job: &WindowJob<'_>) -> Result<Vec<Window>>;

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;
}

/// Automatically select execution mode based on window count
pub fn auto_select(window_count: usize, threshold: usize) -> ExecutionMode {
    if window_count < 2 || window_count < threshold {
        ExecutionMode::Sequential
    } else {
        #[cfg(feature = "parallel")]
        return ExecutionMode::Parallel;

        #[cfg(not(feature = "parallel"))]
        ExecutionMode::Sequential
    }
}
