//! Lingua-backed language classifier
//!
//! Each call averages lingua's confidence values over several trials, every
//! trial looking at a random 80% of the words. The word subsets come from an
//! RNG seeded with the call's seed only. lingua's own confidences jitter in
//! the last bits between calls, so they are summed as integer units and the
//! means rounded; identical text and seed then always produce bit-identical
//! output, whichever thread runs the call.

use crate::error::{EngineError, Result};
use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};
use rand::{rngs::StdRng, seq::index, SeedableRng};
use sitelang_core::{AcceptedLanguages, LanguageClassifier, TrialConfig};
use std::collections::BTreeMap;

/// Mean confidence below which a language is dropped from the estimate
pub const MIN_LANGUAGE_MASS: f64 = 0.1;

/// Share of the words kept in each trial, as a fraction `numerator / 5`
const SUBSET_FIFTHS: usize = 4;

/// Units per 1.0 that trial confidences are accumulated in
const CONFIDENCE_UNITS: f64 = 1e12;

/// Units per 1.0 of reported mean confidences
const REPORTED_UNITS: f64 = 1e9;

/// Tag used for a lingua language
///
/// Both Norwegian written standards collapse onto `no` and Chinese maps to
/// `zh-cn`; everything else uses the ISO 639-1 code.
pub fn lingua_tag(language: Language) -> String {
    match language {
        Language::Bokmal | Language::Nynorsk => "no".to_string(),
        Language::Chinese => "zh-cn".to_string(),
        other => other.iso_code_639_1().to_string(),
    }
}

/// Classifier backed by a lingua detector
pub struct LinguaClassifier {
    detector: LanguageDetector,
    languages: Vec<Language>,
}

impl std::fmt::Debug for LinguaClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinguaClassifier")
            .field("languages", &self.languages.len())
            .finish()
    }
}

impl LinguaClassifier {
    /// Build a detector over every lingua language with an accepted tag
    pub fn new(accepted: &AcceptedLanguages) -> Result<Self> {
        Self::build(accepted, false)
    }

    /// Like [`LinguaClassifier::new`] but with lingua's low accuracy mode,
    /// which needs far less memory
    pub fn low_accuracy(accepted: &AcceptedLanguages) -> Result<Self> {
        Self::build(accepted, true)
    }

    fn build(accepted: &AcceptedLanguages, low_accuracy: bool) -> Result<Self> {
        let mut languages: Vec<Language> = Language::all()
            .into_iter()
            .filter(|language| accepted.contains(&lingua_tag(*language)))
            .collect();
        languages.sort();

        // lingua needs at least two candidates to discriminate
        if languages.len() < 2 {
            return Err(EngineError::TooFewLanguages {
                supported: languages.len(),
            });
        }

        let mut builder = LanguageDetectorBuilder::from_languages(&languages);
        if low_accuracy {
            builder.with_low_accuracy_mode();
        }
        let detector = builder.build();

        tracing::debug!(
            languages = languages.len(),
            low_accuracy,
            "built lingua classifier"
        );

        Ok(Self {
            detector,
            languages,
        })
    }

    /// Lingua languages this classifier can report
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    fn trial_text(words: &[&str], rng: &mut StdRng) -> String {
        let keep = (words.len() * SUBSET_FIFTHS).div_ceil(5).max(1);
        let mut picked = index::sample(rng, words.len(), keep).into_vec();
        picked.sort_unstable();
        picked
            .into_iter()
            .map(|i| words[i])
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl LanguageClassifier for LinguaClassifier {
    fn estimate(&self, text: &str, trials: &TrialConfig) -> Option<Vec<(String, f64)>> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return None;
        }

        let mut rng = StdRng::seed_from_u64(trials.seed);
        let mut sums: BTreeMap<String, u64> = BTreeMap::new();

        for _ in 0..trials.trials {
            let sample = Self::trial_text(&words, &mut rng);
            for (language, confidence) in self.detector.compute_language_confidence_values(sample)
            {
                let units = (confidence.clamp(0.0, 1.0) * CONFIDENCE_UNITS).round() as u64;
                if units > 0 {
                    *sums.entry(lingua_tag(language)).or_insert(0) += units;
                }
            }
        }

        let n = trials.trials.max(1) as f64;
        let mut estimates: Vec<(String, f64)> = sums
            .into_iter()
            .map(|(code, sum)| (code, mean_confidence(sum, n)))
            .filter(|(_, mean)| *mean >= MIN_LANGUAGE_MASS)
            .collect();
        estimates.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        if estimates.is_empty() {
            None
        } else {
            Some(estimates)
        }
    }

    fn name(&self) -> &'static str {
        "lingua"
    }
}

/// Mean of `trials` confidences summed as [`CONFIDENCE_UNITS`], rounded to
/// [`REPORTED_UNITS`]
fn mean_confidence(sum: u64, trials: f64) -> f64 {
    let mean = sum as f64 / CONFIDENCE_UNITS / trials;
    ((mean * REPORTED_UNITS).round() / REPORTED_UNITS).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_mapping() {
        assert_eq!(lingua_tag(Language::English), "en");
        assert_eq!(lingua_tag(Language::Bokmal), "no");
        assert_eq!(lingua_tag(Language::Nynorsk), "no");
        assert_eq!(lingua_tag(Language::Chinese), "zh-cn");
    }

    #[test]
    fn test_requires_two_languages() {
        let err = LinguaClassifier::new(&AcceptedLanguages::new(["en"])).unwrap_err();
        assert!(matches!(err, EngineError::TooFewLanguages { supported: 1 }));

        let err = LinguaClassifier::new(&AcceptedLanguages::new(["xx", "yy"])).unwrap_err();
        assert!(matches!(err, EngineError::TooFewLanguages { supported: 0 }));
    }

    #[test]
    fn test_trial_subset_keeps_order() {
        let words = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
        let mut rng = StdRng::seed_from_u64(0);
        let text = LinguaClassifier::trial_text(&words, &mut rng);
        let picked: Vec<&str> = text.split(' ').collect();
        assert_eq!(picked.len(), 8);

        let positions: Vec<usize> = picked
            .iter()
            .map(|w| words.iter().position(|x| x == w).unwrap())
            .collect();
        assert!(positions.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn test_empty_text_has_no_estimate() {
        let classifier = LinguaClassifier::new(&AcceptedLanguages::new(["en", "de"])).unwrap();
        let trials = TrialConfig { trials: 3, seed: 0 };
        assert!(classifier.estimate("   ", &trials).is_none());
    }

    #[test]
    fn test_reproducible_with_fixed_seed() {
        let classifier = LinguaClassifier::new(&AcceptedLanguages::new(["en", "de"])).unwrap();
        let trials = TrialConfig { trials: 5, seed: 7 };
        let text = "Das ist ein kurzer deutscher Satz ueber das Wetter in Berlin heute";
        assert_eq!(
            classifier.estimate(text, &trials),
            classifier.estimate(text, &trials)
        );
    }

    #[test]
    fn test_repeated_calls_are_bit_identical() {
        let classifier =
            LinguaClassifier::new(&AcceptedLanguages::new(["de", "en", "fr", "nl"])).unwrap();
        let trials = TrialConfig { trials: 20, seed: 0 };
        let text = "An example text to test for mixed language detection, dann ist die \
                    Chance gross, dass beide Sprachen im Ergebnis auftauchen";

        let bits = |estimate: Vec<(String, f64)>| -> Vec<(String, u64)> {
            estimate.into_iter().map(|(code, p)| (code, p.to_bits())).collect()
        };
        let first = bits(classifier.estimate(text, &trials).unwrap());
        for _ in 0..10 {
            assert_eq!(bits(classifier.estimate(text, &trials).unwrap()), first);
        }
    }

    #[test]
    fn test_mean_confidence_rounding() {
        let units = CONFIDENCE_UNITS as u64;
        assert_eq!(mean_confidence(3 * units, 3.0), 1.0);
        assert_eq!(mean_confidence(units / 3, 1.0), 0.333333333);
        assert_eq!(mean_confidence(0, 4.0), 0.0);
    }
}
