//! Language-probability contract
//!
//! Classifiers report loosely typed `(code, probability)` pairs. They are
//! validated here once, so everything downstream works on accepted tags and
//! sane values only.

use crate::error::{CoreError, Result};
use crate::tags::{AcceptedLanguages, LanguageTag};
use std::collections::BTreeMap;

/// Slack allowed on the total probability mass
pub const MASS_TOLERANCE: f64 = 1e-6;

/// Validated probability distribution for one piece of text
///
/// Only languages with reported mass are present, so the values need not sum
/// to one. Entries are ordered by descending probability.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LanguageProbabilities {
    entries: Vec<(LanguageTag, f64)>,
}

impl LanguageProbabilities {
    /// Validate raw classifier estimates
    ///
    /// Values must be finite and within `[0, 1]` and the total must not
    /// exceed one (plus [`MASS_TOLERANCE`]). Codes outside `accepted` are
    /// dropped; repeated codes are merged by summing.
    pub fn from_estimates<I, S>(estimates: I, accepted: &AcceptedLanguages) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut merged: BTreeMap<LanguageTag, f64> = BTreeMap::new();
        let mut total = 0.0;

        for (code, value) in estimates {
            let code = code.as_ref();
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(CoreError::InvalidProbability {
                    code: code.to_string(),
                    value,
                });
            }
            total += value;

            if let Some(tag) = accepted.accept(code) {
                *merged.entry(tag).or_insert(0.0) += value;
            }
        }

        if total > 1.0 + MASS_TOLERANCE {
            return Err(CoreError::ProbabilityMassExceeded { total });
        }

        let mut entries: Vec<(LanguageTag, f64)> = merged.into_iter().collect();
        // BTreeMap order breaks ties, so the sort is deterministic
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(Self { entries })
    }

    /// Most probable language, if any
    pub fn top(&self) -> Option<(&LanguageTag, f64)> {
        self.entries.first().map(|(tag, p)| (tag, *p))
    }

    /// Probability of a language code
    pub fn get(&self, code: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(tag, _)| tag.as_str() == code)
            .map(|(_, p)| *p)
    }

    /// Iterate over `(tag, probability)` in descending order
    pub fn iter(&self) -> impl Iterator<Item = (&LanguageTag, f64)> + '_ {
        self.entries.iter().map(|(tag, p)| (tag, *p))
    }

    /// Number of languages present
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no language has mass
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all present probabilities
    pub fn total_mass(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    /// Copy into a map keyed by tag
    pub fn to_map(&self) -> BTreeMap<LanguageTag, f64> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LanguageProbabilities {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (tag, p) in &self.entries {
            map.serialize_entry(tag.as_str(), p)?;
        }
        map.end()
    }
}
