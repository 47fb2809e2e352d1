//! Per-window classifier contract
//!
//! The classifier itself is an external collaborator. Reproducibility is
//! controlled by a seed that travels with every call instead of living in
//! shared state, so deterministic and randomized callers never interfere.

use std::sync::Arc;

/// Default number of randomized trials per classification
pub const DEFAULT_TRIALS: usize = 20;

/// Seed used in deterministic mode unless configured otherwise
pub const DEFAULT_SEED: u64 = 0;

/// How the seed for a classification call is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum SeedPolicy {
    /// Same seed on every call: identical text gives identical probabilities
    Fixed(u64),
    /// Fresh seed on every call
    Randomized,
}

impl Default for SeedPolicy {
    fn default() -> Self {
        SeedPolicy::Fixed(DEFAULT_SEED)
    }
}

impl SeedPolicy {
    /// Whether calls under this policy are reproducible
    pub fn is_deterministic(&self) -> bool {
        matches!(self, SeedPolicy::Fixed(_))
    }
}

/// Classifier settings shared by all calls of one detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Number of trials the classifier averages over
    pub trials: usize,
    /// Seed selection
    pub seed: SeedPolicy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: SeedPolicy::default(),
        }
    }
}

impl ClassifierConfig {
    /// Resolve the seed policy for a single call
    ///
    /// `fresh_seed` is only invoked for [`SeedPolicy::Randomized`].
    pub fn resolve<F: FnOnce() -> u64>(&self, fresh_seed: F) -> TrialConfig {
        let seed = match self.seed {
            SeedPolicy::Fixed(seed) => seed,
            SeedPolicy::Randomized => fresh_seed(),
        };
        TrialConfig {
            trials: self.trials.max(1),
            seed,
        }
    }
}

/// Concrete, call-scoped classifier parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialConfig {
    /// Number of trials (at least one)
    pub trials: usize,
    /// Seed for this call
    pub seed: u64,
}

/// Language-probability estimator
pub trait LanguageClassifier: Send + Sync {
    /// Estimate language probabilities for `text`
    ///
    /// Returns `(code, probability)` pairs for languages with non-negligible
    /// mass, or `None` when the text carries too little signal. Implementations
    /// must return identical output for identical `text` and `trials`.
    fn estimate(&self, text: &str, trials: &TrialConfig) -> Option<Vec<(String, f64)>>;

    /// Short name used in logs
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<C: LanguageClassifier + ?Sized> LanguageClassifier for Arc<C> {
    fn estimate(&self, text: &str, trials: &TrialConfig) -> Option<Vec<(String, f64)>> {
        (**self).estimate(text, trials)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<C: LanguageClassifier + ?Sized> LanguageClassifier for &C {
    fn estimate(&self, text: &str, trials: &TrialConfig) -> Option<Vec<(String, f64)>> {
        (**self).estimate(text, trials)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_seed_ignores_entropy() {
        let config = ClassifierConfig::default();
        let trial = config.resolve(|| panic!("fixed seed must not draw entropy"));
        assert_eq!(trial.seed, DEFAULT_SEED);
        assert_eq!(trial.trials, DEFAULT_TRIALS);
    }

    #[test]
    fn test_randomized_seed_draws_entropy() {
        let config = ClassifierConfig {
            trials: 0,
            seed: SeedPolicy::Randomized,
        };
        let trial = config.resolve(|| 42);
        assert_eq!(trial.seed, 42);
        // Zero trials is clamped
        assert_eq!(trial.trials, 1);
    }

    #[test]
    fn test_policy_determinism() {
        assert!(SeedPolicy::Fixed(7).is_deterministic());
        assert!(!SeedPolicy::Randomized.is_deterministic());
    }
}
