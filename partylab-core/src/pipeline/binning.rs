//! Party binning — group monthly averages into 12 calendar-month buckets,
//! split by party and by transition type.
//!
//! The change series and label series are consumed as positionally aligned
//! sequences of equal length. Alignment is re-validated here month-for-month
//! before any bucket is touched: a mismatch fails fast with no partial
//! output. The bucket index is derived from each record's own month, so
//! upstream drops (outlier clamp, undefined months) can never shift a value
//! into the wrong calendar bucket.

use super::cross_section::ChangePoint;
use crate::domain::party::{Party, PartyLabel, PartyLabelSeries, Transition};
use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Change series and label series cannot be paired.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("change series has {changes} months but label series has {labels}")]
    LengthMismatch { changes: usize, labels: usize },

    #[error("row {index}: change month {change_month} does not match label month {label_month}")]
    MonthMismatch {
        index: usize,
        change_month: NaiveDate,
        label_month: NaiveDate,
    },

    #[error("no party label for month {month}")]
    MissingLabel { month: NaiveDate },
}

/// Twelve unordered collections of observations, January first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthBuckets {
    buckets: [Vec<f64>; 12],
}

impl MonthBuckets {
    pub fn push(&mut self, month_index: usize, value: f64) {
        self.buckets[month_index].push(value);
    }

    /// Observations for one calendar month (0 = January).
    pub fn bucket(&self, month_index: usize) -> &[f64] {
        &self.buckets[month_index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.buckets.iter().map(Vec::as_slice)
    }

    /// Total observations across all 12 buckets.
    pub fn observation_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Number of calendar months with no observations.
    pub fn empty_bucket_count(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_empty()).count()
    }
}

/// The five parallel bucket sets produced by one binning pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartyBins {
    pub overall: MonthBuckets,
    pub democrat: MonthBuckets,
    pub republican: MonthBuckets,
    pub dem_to_rep: MonthBuckets,
    pub rep_to_dem: MonthBuckets,
}

/// Select the label for each surviving change point, by month.
///
/// This is how the label series follows the change series through the
/// averager's drop step: whatever months survive, their labels are looked up
/// here. A month with no label fails the whole call.
pub fn align_labels(
    series: &PartyLabelSeries,
    points: &[ChangePoint],
) -> Result<Vec<PartyLabel>, AlignmentError> {
    points
        .iter()
        .map(|p| {
            series
                .label_for(p.month)
                .copied()
                .ok_or(AlignmentError::MissingLabel { month: p.month })
        })
        .collect()
}

/// Bin each monthly average into the overall, party, and (when flagged)
/// transition bucket for its calendar month.
///
/// Precondition: `points` and `labels` have equal length and agree
/// month-for-month. Violations return an error before any bucket is filled.
pub fn bin_by_party(
    points: &[ChangePoint],
    labels: &[PartyLabel],
) -> Result<PartyBins, AlignmentError> {
    if points.len() != labels.len() {
        return Err(AlignmentError::LengthMismatch {
            changes: points.len(),
            labels: labels.len(),
        });
    }
    for (i, (point, label)) in points.iter().zip(labels).enumerate() {
        if (point.month.year(), point.month.month()) != (label.month.year(), label.month.month()) {
            return Err(AlignmentError::MonthMismatch {
                index: i,
                change_month: point.month,
                label_month: label.month,
            });
        }
    }

    let mut bins = PartyBins::default();
    for (point, label) in points.iter().zip(labels) {
        let idx = point.month.month0() as usize;

        bins.overall.push(idx, point.value);
        match label.party {
            Party::Democrat => bins.democrat.push(idx, point.value),
            Party::Republican => bins.republican.push(idx, point.value),
        }
        match label.transition {
            Transition::None => {}
            Transition::DemToRep => bins.dem_to_rep.push(idx, point.value),
            Transition::RepToDem => bins.rep_to_dem.push(idx, point.value),
        }
    }
    Ok(bins)
}
