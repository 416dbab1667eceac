//! Histogram of the raw monthly change distribution.
//!
//! Equal-width bins over [min, max] of the observed values — the numeric
//! counterpart of the distribution chart in the source analysis. Counts are
//! exact; rendering is left to the report layer.

use serde::{Deserialize, Serialize};

/// Default bin count for the monthly change distribution.
pub const DEFAULT_BINS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    #[serde(with = "nan_scalar")]
    pub min: f64,
    #[serde(with = "nan_scalar")]
    pub max: f64,
    #[serde(with = "nan_scalar")]
    pub bin_width: f64,
    pub counts: Vec<u64>,
    /// Total observations binned.
    pub total: u64,
}

/// NaN ⇄ null, keeping empty-histogram manifests valid JSON.
mod nan_scalar {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            None::<f64>.serialize(serializer)
        } else {
            Some(*value).serialize(serializer)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

impl Histogram {
    /// Bin finite values into `bins` equal-width buckets spanning
    /// [min, max]. Non-finite values are skipped. With no finite values the
    /// histogram is empty (zero bins).
    pub fn from_values(values: &[f64], bins: usize) -> Histogram {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return Histogram {
                min: f64::NAN,
                max: f64::NAN,
                bin_width: f64::NAN,
                counts: Vec::new(),
                total: 0,
            };
        }

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // Degenerate span: every value identical — one bin holds them all.
        if min == max {
            return Histogram {
                min,
                max,
                bin_width: 0.0,
                counts: vec![finite.len() as u64],
                total: finite.len() as u64,
            };
        }

        let bin_width = (max - min) / bins as f64;
        let mut counts = vec![0u64; bins];
        for v in &finite {
            let idx = (((v - min) / bin_width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Histogram {
            min,
            max,
            bin_width,
            counts,
            total: finite.len() as u64,
        }
    }

    /// Inclusive lower edge of a bin.
    pub fn bin_start(&self, index: usize) -> f64 {
        self.min + self.bin_width * index as f64
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
