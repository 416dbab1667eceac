//! Cross-sectional averaging — one scalar "average market change" per month.

use super::bound::ChangeBound;
use super::resample::MonthlyChanges;
use chrono::NaiveDate;

/// Average percent change across all symbols for one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangePoint {
    /// First day of the month the change lands in.
    pub month: NaiveDate,
    pub value: f64,
}

/// For each month, the mean change across symbols with a defined value.
/// A month where every symbol is undefined gets NaN (kept here; dropped by
/// [`clamp_outliers`]).
pub fn average_changes(changes: &MonthlyChanges) -> Vec<ChangePoint> {
    changes
        .months
        .iter()
        .zip(&changes.rows)
        .map(|(&month, row)| {
            let defined: Vec<f64> = row.iter().copied().filter(|v| !v.is_nan()).collect();
            let value = if defined.is_empty() {
                f64::NAN
            } else {
                defined.iter().sum::<f64>() / defined.len() as f64
            };
            ChangePoint { month, value }
        })
        .collect()
}

/// Drop months whose average is undefined or outside the bound. The month
/// label travels with the value, so downstream binning stays aligned after
/// the drop.
pub fn clamp_outliers(points: &[ChangePoint], bound: &ChangeBound) -> Vec<ChangePoint> {
    points
        .iter()
        .filter(|p| bound.admits(p.value))
        .copied()
        .collect()
}
