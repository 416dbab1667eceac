//! Monthly resampling and month-over-month percent change.
//!
//! Resampling takes, for each calendar month, the FIRST daily row observed in
//! that month — not the month-end close. A month's observation is its opening
//! print, whatever day that happens to fall on.

use crate::domain::price_table::PriceTable;
use chrono::{Datelike, NaiveDate};

/// One price row per calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPrices {
    /// First day of each sampled month, ascending.
    pub months: Vec<NaiveDate>,
    pub symbols: Vec<String>,
    /// Row-major, `rows[i][s]`; NaN = missing.
    pub rows: Vec<Vec<f64>>,
}

/// Month-over-month percent change per symbol. Row 0 of the monthly prices
/// has no predecessor and is dropped, so `months[i]` is the month the change
/// lands in.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyChanges {
    pub months: Vec<NaiveDate>,
    pub symbols: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

/// Collapse a daily table to one row per calendar month (the first daily row
/// within each month).
pub fn resample_monthly(table: &PriceTable) -> MonthlyPrices {
    let mut months: Vec<NaiveDate> = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut current: Option<(i32, u32)> = None;

    for (i, date) in table.dates().iter().enumerate() {
        let key = (date.year(), date.month());
        if current != Some(key) {
            current = Some(key);
            // Month label is the calendar month, independent of which day
            // happened to be the first trading day.
            if let Some(start) = NaiveDate::from_ymd_opt(key.0, key.1, 1) {
                months.push(start);
                rows.push(table.row(i).to_vec());
            }
        }
    }

    MonthlyPrices {
        months,
        symbols: table.symbols().to_vec(),
        rows,
    }
}

/// Per-symbol percent change between consecutive monthly rows:
/// `(p[i] - p[i-1]) / p[i-1]`. A missing price on either side, or a zero
/// divisor, yields NaN — no-data, never a panic.
pub fn percent_changes(monthly: &MonthlyPrices) -> MonthlyChanges {
    let width = monthly.symbols.len();
    let mut rows = Vec::with_capacity(monthly.rows.len().saturating_sub(1));

    for pair in monthly.rows.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        let mut row = Vec::with_capacity(width);
        for s in 0..width {
            let (p0, p1) = (prev[s], curr[s]);
            if p0.is_nan() || p1.is_nan() || p0 == 0.0 {
                row.push(f64::NAN);
            } else {
                row.push((p1 - p0) / p0);
            }
        }
        rows.push(row);
    }

    MonthlyChanges {
        months: monthly.months.iter().skip(1).copied().collect(),
        symbols: monthly.symbols.clone(),
        rows,
    }
}
