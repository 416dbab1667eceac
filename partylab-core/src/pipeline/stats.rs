//! Bucket statistics — mean and standard error per calendar month.

use super::binning::MonthBuckets;
use super::bound::ChangeBound;
use crate::domain::MONTH_LABELS;
use serde::{Deserialize, Serialize};

/// Mean and standard error of one bucket. An empty bucket is undefined:
/// mean and standard error are NaN and the row is excluded from paired
/// output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketStatistics {
    pub mean: f64,
    pub std_error: f64,
    pub count: usize,
}

/// Mean and standard error = stddev / sqrt(n), with the population standard
/// deviation (a single observation has zero spread, not undefined spread).
pub fn bucket_statistics(values: &[f64]) -> BucketStatistics {
    let n = values.len();
    if n == 0 {
        return BucketStatistics {
            mean: f64::NAN,
            std_error: f64::NAN,
            count: 0,
        };
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    let std_error = variance.sqrt() / (n as f64).sqrt();

    BucketStatistics {
        mean,
        std_error,
        count: n,
    }
}

/// Twelve parallel bucket statistics, labeled January..December.
///
/// Undefined entries (empty buckets) are NaN in memory and `null` in
/// serialized form, so result manifests stay valid JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalStats {
    #[serde(with = "nan_array")]
    pub means: [f64; 12],
    #[serde(with = "nan_array")]
    pub std_errors: [f64; 12],
    pub counts: [usize; 12],
}

/// NaN ⇄ null for fixed 12-element series.
mod nan_array {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(values: &[f64; 12], serializer: S) -> Result<S::Ok, S::Error> {
        let cells: Vec<Option<f64>> = values
            .iter()
            .map(|v| if v.is_nan() { None } else { Some(*v) })
            .collect();
        cells.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[f64; 12], D::Error> {
        let cells: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
        if cells.len() != 12 {
            return Err(serde::de::Error::invalid_length(
                cells.len(),
                &"12 monthly values",
            ));
        }
        let mut out = [f64::NAN; 12];
        for (i, cell) in cells.into_iter().enumerate() {
            out[i] = cell.unwrap_or(f64::NAN);
        }
        Ok(out)
    }
}

impl SeasonalStats {
    pub fn from_buckets(buckets: &MonthBuckets) -> SeasonalStats {
        let mut means = [f64::NAN; 12];
        let mut std_errors = [f64::NAN; 12];
        let mut counts = [0usize; 12];

        for (i, bucket) in buckets.iter().enumerate() {
            let stats = bucket_statistics(bucket);
            means[i] = stats.mean;
            std_errors[i] = stats.std_error;
            counts[i] = stats.count;
        }

        SeasonalStats {
            means,
            std_errors,
            counts,
        }
    }

    /// Calendar-month label for a bucket index (0 = "jan").
    pub fn month_label(index: usize) -> &'static str {
        MONTH_LABELS[index]
    }

    /// Number of months whose statistics are undefined (empty buckets).
    pub fn undefined_months(&self) -> usize {
        self.counts.iter().filter(|&&c| c == 0).count()
    }
}

/// One calendar-month row of a paired (two-split) comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedRow {
    pub month: String,
    pub month_index: usize,
    pub a_mean: f64,
    pub a_std_error: f64,
    pub b_mean: f64,
    pub b_std_error: f64,
}

/// Pair two seasonal series for presentation, keeping only calendar months
/// where both means are admitted by the bound. The clamp the averager applied
/// per month is re-applied here on the bucket means.
pub fn paired_rows(a: &SeasonalStats, b: &SeasonalStats, bound: &ChangeBound) -> Vec<PairedRow> {
    (0..12)
        .filter(|&i| bound.admits(a.means[i]) && bound.admits(b.means[i]))
        .map(|i| PairedRow {
            month: MONTH_LABELS[i].to_string(),
            month_index: i,
            a_mean: a.means[i],
            a_std_error: a.std_errors[i],
            b_mean: b.means[i],
            b_std_error: b.std_errors[i],
        })
        .collect()
}
