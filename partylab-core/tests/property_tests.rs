//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Standard error is non-negative and follows stddev/sqrt(n)
//! 2. The clamp: no value at or beyond the bound survives into buckets
//! 3. Binning is total — every admitted observation lands in exactly one
//!    overall bucket, and party buckets partition the overall set
//! 4. Determinism — identical input slices give bit-identical statistics

use chrono::NaiveDate;
use partylab_core::domain::{Party, PartyLabel, Transition};
use partylab_core::pipeline::{
    bin_by_party, bucket_statistics, clamp_outliers, ChangeBound, ChangePoint, SeasonalStats,
};
use proptest::prelude::*;

// ── Strategies ───────────────────────────────────────────────────────

fn arb_change() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -0.8..0.8f64,
        1 => Just(f64::NAN),
        1 => 0.5..5.0f64,
    ]
}

/// A run of consecutive months starting at the given year/month, with one
/// change value and party assignment per month.
fn arb_series() -> impl Strategy<Value = Vec<(ChangePoint, PartyLabel)>> {
    (
        1980..2010i32,
        prop::collection::vec((arb_change(), prop::bool::ANY), 1..60),
    )
        .prop_map(|(start_year, entries)| {
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (value, is_rep))| {
                    let year = start_year + (i / 12) as i32;
                    let month0 = (i % 12) as u32;
                    let month = NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap();
                    (
                        ChangePoint { month, value },
                        PartyLabel {
                            month,
                            party: if is_rep {
                                Party::Republican
                            } else {
                                Party::Democrat
                            },
                            transition: Transition::None,
                        },
                    )
                })
                .collect()
        })
}

// ── 1. Standard error ────────────────────────────────────────────────

proptest! {
    #[test]
    fn std_error_is_nonnegative_and_consistent(
        values in prop::collection::vec(-0.5..0.5f64, 1..40)
    ) {
        let stats = bucket_statistics(&values);
        prop_assert!(stats.std_error >= 0.0);

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let stddev = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
        prop_assert!((stats.std_error - stddev / n.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn single_value_bucket_has_zero_error(v in -0.5..0.5f64) {
        prop_assert_eq!(bucket_statistics(&[v]).std_error, 0.0);
    }
}

// ── 2 & 3. Clamp and binning totality ────────────────────────────────

proptest! {
    #[test]
    fn no_out_of_bound_value_survives_binning(series in arb_series()) {
        let bound = ChangeBound::default();
        let (points, labels): (Vec<ChangePoint>, Vec<PartyLabel>) =
            series.into_iter().unzip();

        let kept = clamp_outliers(&points, &bound);
        let kept_labels: Vec<PartyLabel> = kept
            .iter()
            .map(|p| *labels.iter().find(|l| l.month == p.month).unwrap())
            .collect();

        let bins = bin_by_party(&kept, &kept_labels).unwrap();

        for bucket in bins.overall.iter() {
            for &v in bucket {
                prop_assert!(v.is_finite());
                prop_assert!(v.abs() < bound.max_abs());
            }
        }
    }

    #[test]
    fn party_buckets_partition_overall(series in arb_series()) {
        let bound = ChangeBound::default();
        let (points, labels): (Vec<ChangePoint>, Vec<PartyLabel>) =
            series.into_iter().unzip();

        let kept = clamp_outliers(&points, &bound);
        let kept_labels: Vec<PartyLabel> = kept
            .iter()
            .map(|p| *labels.iter().find(|l| l.month == p.month).unwrap())
            .collect();

        let bins = bin_by_party(&kept, &kept_labels).unwrap();

        prop_assert_eq!(bins.overall.observation_count(), kept.len());
        prop_assert_eq!(
            bins.democrat.observation_count() + bins.republican.observation_count(),
            bins.overall.observation_count()
        );

        for i in 0..12 {
            prop_assert_eq!(
                bins.democrat.bucket(i).len() + bins.republican.bucket(i).len(),
                bins.overall.bucket(i).len()
            );
        }
    }

    #[test]
    fn length_mismatch_always_errors(series in arb_series()) {
        let (points, mut labels): (Vec<ChangePoint>, Vec<PartyLabel>) =
            series.into_iter().unzip();
        labels.pop();

        prop_assert!(bin_by_party(&points, &labels).is_err());
    }
}

// ── 4. Determinism ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn statistics_are_bit_identical_across_runs(series in arb_series()) {
        let bound = ChangeBound::default();
        let (points, labels): (Vec<ChangePoint>, Vec<PartyLabel>) =
            series.into_iter().unzip();

        let kept = clamp_outliers(&points, &bound);
        let kept_labels: Vec<PartyLabel> = kept
            .iter()
            .map(|p| *labels.iter().find(|l| l.month == p.month).unwrap())
            .collect();

        let stats_of = || {
            let bins = bin_by_party(&kept, &kept_labels).unwrap();
            SeasonalStats::from_buckets(&bins.overall)
        };

        let (a, b) = (stats_of(), stats_of());
        prop_assert_eq!(a.means.map(f64::to_bits), b.means.map(f64::to_bits));
        prop_assert_eq!(
            a.std_errors.map(f64::to_bits),
            b.std_errors.map(f64::to_bits)
        );
        prop_assert_eq!(a.counts, b.counts);
    }
}
