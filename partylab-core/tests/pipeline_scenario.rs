//! End-to-end pipeline test on a small hand-checked dataset.
//!
//! Three symbols, four monthly observations (Dec 2000 .. Mar 2001), so the
//! three changes land in Jan/Feb/Mar. Every number below is verifiable by
//! hand.

use chrono::NaiveDate;
use partylab_core::domain::{Party, PartyLabel, PartyLabelSeries, PriceTable, Transition};
use partylab_core::pipeline::{
    align_labels, average_changes, bin_by_party, clamp_outliers, paired_rows, percent_changes,
    resample_monthly, ChangeBound, SeasonalStats,
};

const EPSILON: f64 = 1e-12;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn fixture_table() -> PriceTable {
    PriceTable::new(
        vec![
            date("2000-12-01"),
            date("2001-01-02"),
            date("2001-02-01"),
            date("2001-03-01"),
        ],
        vec!["AAA".into(), "BBB".into(), "CCC".into()],
        vec![
            vec![100.0, 200.0, 50.0],
            vec![110.0, 190.0, 55.0],
            vec![99.0, 171.0, 49.5],
            vec![108.9, 188.1, 54.45],
        ],
    )
    .unwrap()
}

fn fixture_labels() -> PartyLabelSeries {
    PartyLabelSeries::new(vec![
        PartyLabel {
            month: date("2000-12-01"),
            party: Party::Democrat,
            transition: Transition::None,
        },
        PartyLabel {
            month: date("2001-01-01"),
            party: Party::Democrat,
            transition: Transition::None,
        },
        PartyLabel {
            month: date("2001-02-01"),
            party: Party::Democrat,
            transition: Transition::None,
        },
        PartyLabel {
            month: date("2001-03-01"),
            party: Party::Republican,
            transition: Transition::DemToRep,
        },
    ])
    .unwrap()
}

#[test]
fn full_pipeline_produces_hand_checked_numbers() {
    let table = fixture_table();
    let labels = fixture_labels();
    let bound = ChangeBound::default();

    // Per-symbol monthly changes.
    let changes = percent_changes(&resample_monthly(&table));
    assert_eq!(changes.rows.len(), 3);
    let expected = [
        [0.10, -0.05, 0.10],
        [-0.10, -0.10, -0.10],
        [0.10, 0.10, 0.10],
    ];
    for (row, exp) in changes.rows.iter().zip(&expected) {
        for (v, e) in row.iter().zip(exp) {
            assert!((v - e).abs() < EPSILON, "change {v} != {e}");
        }
    }

    // Cross-sectional averages.
    let averages = clamp_outliers(&average_changes(&changes), &bound);
    assert_eq!(averages.len(), 3);
    assert!((averages[0].value - 0.05).abs() < EPSILON);
    assert!((averages[1].value - -0.10).abs() < EPSILON);
    assert!((averages[2].value - 0.10).abs() < EPSILON);

    // Binning: Jan and Feb under a democrat, Mar under a republican.
    let aligned = align_labels(&labels, &averages).unwrap();
    let bins = bin_by_party(&averages, &aligned).unwrap();

    assert_eq!(bins.democrat.bucket(0), &[0.05]);
    assert_eq!(bins.democrat.bucket(1), &[-0.10]);
    assert!(bins.democrat.bucket(2).is_empty());
    assert_eq!(bins.republican.bucket(2), &[0.10]);
    assert_eq!(bins.dem_to_rep.bucket(2), &[0.10]);
    assert_eq!(bins.rep_to_dem.observation_count(), 0);

    // Aggregate statistics: single-observation buckets have zero error.
    let overall = SeasonalStats::from_buckets(&bins.overall);
    assert!((overall.means[0] - 0.05).abs() < EPSILON);
    assert_eq!(overall.std_errors[0], 0.0);
    assert_eq!(overall.counts[0], 1);
    assert_eq!(overall.undefined_months(), 9);

    // Paired presentation keeps only months defined on both sides.
    let dem = SeasonalStats::from_buckets(&bins.democrat);
    let rep = SeasonalStats::from_buckets(&bins.republican);
    assert!(paired_rows(&dem, &rep, &bound).is_empty());
}

#[test]
fn outlier_month_never_reaches_statistics() {
    let table = PriceTable::new(
        vec![date("2000-12-01"), date("2001-01-02"), date("2001-02-01")],
        vec!["AAA".into()],
        vec![vec![100.0], vec![180.0], vec![181.0]],
    )
    .unwrap();
    let bound = ChangeBound::default();

    // Jan change is +80% — clamped out; only Feb survives.
    let averages = clamp_outliers(
        &average_changes(&percent_changes(&resample_monthly(&table))),
        &bound,
    );
    assert_eq!(averages.len(), 1);
    assert_eq!(averages[0].month, date("2001-02-01"));

    let aligned = align_labels(&fixture_labels(), &averages).unwrap();
    let bins = bin_by_party(&averages, &aligned).unwrap();
    let overall = SeasonalStats::from_buckets(&bins.overall);

    // January bucket is empty; February carries the surviving value.
    assert_eq!(overall.counts[0], 0);
    assert!(overall.means[0].is_nan());
    assert_eq!(overall.counts[1], 1);
    for i in 0..12 {
        assert!(
            overall.means[i].is_nan() || overall.means[i].abs() < bound.max_abs(),
            "month {i} mean escaped the clamp"
        );
    }
}

#[test]
fn pipeline_is_deterministic() {
    let table = fixture_table();
    let labels = fixture_labels();
    let bound = ChangeBound::default();

    let run = || {
        let averages = clamp_outliers(
            &average_changes(&percent_changes(&resample_monthly(&table))),
            &bound,
        );
        let aligned = align_labels(&labels, &averages).unwrap();
        let bins = bin_by_party(&averages, &aligned).unwrap();
        (
            SeasonalStats::from_buckets(&bins.overall),
            SeasonalStats::from_buckets(&bins.democrat),
            SeasonalStats::from_buckets(&bins.republican),
        )
    };

    let (o1, d1, r1) = run();
    let (o2, d2, r2) = run();

    // Bit-identical, not merely approximately equal.
    assert_eq!(o1.means.map(f64::to_bits), o2.means.map(f64::to_bits));
    assert_eq!(
        o1.std_errors.map(f64::to_bits),
        o2.std_errors.map(f64::to_bits)
    );
    assert_eq!(d1.means.map(f64::to_bits), d2.means.map(f64::to_bits));
    assert_eq!(r1.means.map(f64::to_bits), r2.means.map(f64::to_bits));
    assert_eq!(d1.counts, d2.counts);
    assert_eq!(r1.counts, r2.counts);
}
