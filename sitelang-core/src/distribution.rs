//! Distribution aggregation
//!
//! Combines window labels into a document-level language distribution,
//! either as raw counts or as shares summing to one.

use crate::label::Label;
use crate::tags::LanguageTag;
use std::collections::BTreeMap;

/// Output form of an aggregated distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum AggregationMode {
    /// Number of windows per language
    Counts,
    /// Fraction of windows per language
    #[default]
    Shares,
}

/// Aggregation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationOptions {
    /// Counts or shares
    pub mode: AggregationMode,
    /// Whether the unknown bucket is part of the output
    pub include_unknown: bool,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            mode: AggregationMode::Shares,
            include_unknown: true,
        }
    }
}

/// Document-level language distribution
#[derive(Debug, Clone, PartialEq)]
pub enum Distribution {
    /// Windows per label
    Counts(BTreeMap<Label, usize>),
    /// Share of windows per label; sums to one unless empty
    Shares(BTreeMap<Label, f64>),
}

impl Default for Distribution {
    fn default() -> Self {
        Distribution::Shares(BTreeMap::new())
    }
}

impl Distribution {
    /// Value for a label, counts widened to `f64`
    pub fn get(&self, label: &Label) -> Option<f64> {
        match self {
            Distribution::Counts(map) => map.get(label).map(|&c| c as f64),
            Distribution::Shares(map) => map.get(label).copied(),
        }
    }

    /// Value for a key as it appears in output (`"en"`, `"unk"`, ...)
    pub fn value_of(&self, key: &str) -> Option<f64> {
        self.iter().find(|(label, _)| label.as_str() == key).map(|(_, v)| v)
    }

    /// Iterate in key order
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&Label, f64)> + '_> {
        match self {
            Distribution::Counts(map) => Box::new(map.iter().map(|(l, &c)| (l, c as f64))),
            Distribution::Shares(map) => Box::new(map.iter().map(|(l, &s)| (l, s))),
        }
    }

    /// Label with the largest value; ties resolve to the earlier key
    pub fn dominant(&self) -> Option<(&Label, f64)> {
        self.iter().fold(None, |best, (label, value)| match best {
            Some((_, best_value)) if best_value >= value => best,
            _ => Some((label, value)),
        })
    }

    /// Most represented language, ignoring the unknown bucket
    pub fn dominant_language(&self) -> Option<(&LanguageTag, f64)> {
        self.iter()
            .filter_map(|(label, value)| label.language().map(|tag| (tag, value)))
            .fold(None, |best, (tag, value)| match best {
                Some((_, best_value)) if best_value >= value => best,
                _ => Some((tag, value)),
            })
    }

    /// Sum of all values
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        match self {
            Distribution::Counts(map) => map.len(),
            Distribution::Shares(map) => map.len(),
        }
    }

    /// Whether the distribution has no keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Which mode produced this distribution
    pub fn mode(&self) -> AggregationMode {
        match self {
            Distribution::Counts(_) => AggregationMode::Counts,
            Distribution::Shares(_) => AggregationMode::Shares,
        }
    }

    /// Empty distribution of the given mode
    pub fn empty(mode: AggregationMode) -> Self {
        match mode {
            AggregationMode::Counts => Distribution::Counts(BTreeMap::new()),
            AggregationMode::Shares => Distribution::Shares(BTreeMap::new()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Distribution {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        match self {
            Distribution::Counts(counts) => {
                for (label, count) in counts {
                    map.serialize_entry(label.as_str(), count)?;
                }
            }
            Distribution::Shares(shares) => {
                for (label, share) in shares {
                    map.serialize_entry(label.as_str(), share)?;
                }
            }
        }
        map.end()
    }
}

/// Combines window labels into a [`Distribution`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DistributionAggregator {
    options: AggregationOptions,
}

impl DistributionAggregator {
    /// Create an aggregator
    pub fn new(options: AggregationOptions) -> Self {
        Self { options }
    }

    /// Configured options
    pub fn options(&self) -> AggregationOptions {
        self.options
    }

    /// Aggregate window labels
    ///
    /// Shares are normalised by the total window count when unknown is
    /// included and by the classified window count otherwise, so they sum to
    /// one in both cases. The unknown share is `1 - classified / total` and is
    /// only emitted when strictly positive.
    pub fn aggregate<'a, I>(&self, labels: I) -> Distribution
    where
        I: IntoIterator<Item = &'a Label>,
    {
        let tally = LabelTally::from_labels(labels);
        let include_unknown = self.options.include_unknown;

        match self.options.mode {
            AggregationMode::Counts => {
                let mut counts: BTreeMap<Label, usize> = tally
                    .languages
                    .into_iter()
                    .map(|(tag, count)| (Label::Language(tag), count))
                    .collect();
                let unknown = tally.total - tally.classified;
                if include_unknown && unknown > 0 {
                    counts.insert(Label::Unknown, unknown);
                }
                Distribution::Counts(counts)
            }
            AggregationMode::Shares => {
                let denominator = if include_unknown {
                    tally.total
                } else {
                    tally.classified
                };
                if denominator == 0 {
                    return Distribution::Shares(BTreeMap::new());
                }

                let mut shares: BTreeMap<Label, f64> = tally
                    .languages
                    .into_iter()
                    .map(|(tag, count)| (Label::Language(tag), count as f64 / denominator as f64))
                    .collect();
                if include_unknown {
                    let unknown = 1.0 - tally.classified as f64 / tally.total as f64;
                    if unknown > 0.0 {
                        shares.insert(Label::Unknown, unknown);
                    }
                }
                Distribution::Shares(shares)
            }
        }
    }
}

/// Window counts per language
#[derive(Debug, Default)]
struct LabelTally {
    languages: BTreeMap<LanguageTag, usize>,
    classified: usize,
    total: usize,
}

impl LabelTally {
    fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a Label>,
    {
        let mut tally = Self::default();
        for label in labels {
            tally.total += 1;
            if let Label::Language(tag) = label {
                *tally.languages.entry(tag.clone()).or_insert(0) += 1;
                tally.classified += 1;
            }
        }
        tally
    }
}
