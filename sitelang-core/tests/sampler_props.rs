//! Property tests for sampling and aggregation

use proptest::prelude::*;
use sitelang_core::*;

fn label_strategy() -> impl Strategy<Value = Label> {
    let accepted = AcceptedLanguages::new(["de", "en", "fr"]);
    prop_oneof![
        Just("de"),
        Just("en"),
        Just("fr"),
        Just("unk"),
    ]
    .prop_map(move |code| match accepted.accept(code) {
        Some(tag) => Label::Language(tag),
        None => Label::Unknown,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Window count never exceeds the sample target beyond the sliding tier
    #[test]
    fn prop_window_count_bounded(
        word_count in 0usize..5000,
        window in 1usize..50,
        samples in 1usize..50,
    ) {
        let sampler = WindowSampler::new(window, samples).unwrap();
        let offsets = sampler.offsets(word_count);

        match sampler.tier(word_count) {
            SamplingTier::Empty => prop_assert!(offsets.is_empty()),
            SamplingTier::Single => prop_assert_eq!(offsets, vec![0]),
            SamplingTier::Sliding => {
                prop_assert_eq!(offsets.len(), word_count - window);
                prop_assert!(offsets.len() < samples);
            }
            SamplingTier::Strided { step } => {
                prop_assert!(step >= 1);
                prop_assert_eq!(offsets.len(), samples);
            }
        }
    }

    /// Every window is full length once the document exceeds one window
    #[test]
    fn prop_windows_stay_in_bounds(
        word_count in 0usize..2000,
        window in 1usize..40,
        samples in 1usize..40,
    ) {
        let sampler = WindowSampler::new(window, samples).unwrap();
        let offsets = sampler.offsets(word_count);

        prop_assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));
        if word_count > window {
            for start in offsets {
                prop_assert!(start + window <= word_count);
            }
        }
    }

    /// Shares sum to one whenever they are non-empty
    #[test]
    fn prop_shares_sum_to_one(
        labels in prop::collection::vec(label_strategy(), 0..100),
        include_unknown in any::<bool>(),
    ) {
        let dist = DistributionAggregator::new(AggregationOptions {
            mode: AggregationMode::Shares,
            include_unknown,
        })
        .aggregate(&labels);

        if !dist.is_empty() {
            prop_assert!((dist.total() - 1.0).abs() < 1e-9);
        }
        if !include_unknown {
            prop_assert!(dist.value_of(UNKNOWN_LABEL).is_none());
        }
    }

    /// Counts add up to the number of windows they cover
    #[test]
    fn prop_counts_cover_windows(labels in prop::collection::vec(label_strategy(), 0..100)) {
        let dist = DistributionAggregator::new(AggregationOptions {
            mode: AggregationMode::Counts,
            include_unknown: true,
        })
        .aggregate(&labels);

        prop_assert_eq!(dist.total() as usize, labels.len());
    }
}
