//! The statistical pipeline: monthly resampling, percent change,
//! cross-sectional averaging, party binning, and bucket statistics.
//!
//! Stage order (each stage is a pure function):
//! 1. [`resample::resample_monthly`] — daily table → one row per month
//! 2. [`resample::percent_changes`] — month-over-month change per symbol
//! 3. [`cross_section::average_changes`] — mean change across symbols
//! 4. [`cross_section::clamp_outliers`] — drop undefined / out-of-bound months
//! 5. [`binning::bin_by_party`] — 12 calendar-month buckets per split
//! 6. [`stats::SeasonalStats`] — per-bucket mean and standard error

pub mod binning;
pub mod bound;
pub mod cross_section;
pub mod resample;
pub mod stats;

pub use binning::{align_labels, bin_by_party, AlignmentError, MonthBuckets, PartyBins};
pub use bound::ChangeBound;
pub use cross_section::{average_changes, clamp_outliers, ChangePoint};
pub use resample::{percent_changes, resample_monthly, MonthlyChanges, MonthlyPrices};
pub use stats::{bucket_statistics, paired_rows, BucketStatistics, PairedRow, SeasonalStats};
