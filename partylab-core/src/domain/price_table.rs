//! PriceTable — wide daily price data, one column per ticker symbol.
//!
//! Missing prices are strict NaN. A NaN cell means "no observation for this
//! symbol on this date" and propagates as no-data through the pipeline; it is
//! never forward-filled.

use chrono::NaiveDate;
use std::collections::HashSet;
use thiserror::Error;

/// Daily adjusted-close prices for a set of symbols on a shared date axis.
///
/// Invariants (enforced by [`PriceTable::new`]):
/// - dates are strictly ascending (unique)
/// - every row has exactly one cell per symbol
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    symbols: Vec<String>,
    rows: Vec<Vec<f64>>,
}

/// Invariant violations detected when constructing a [`PriceTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("row count {rows} does not match date count {dates}")]
    RowCountMismatch { rows: usize, dates: usize },

    #[error("row {row} has {cells} cells but the table has {symbols} symbols")]
    RowWidthMismatch {
        row: usize,
        cells: usize,
        symbols: usize,
    },

    #[error("dates are not strictly ascending at row {row} ({prev} >= {curr})")]
    UnsortedDates {
        row: usize,
        prev: NaiveDate,
        curr: NaiveDate,
    },
}

impl PriceTable {
    /// Build a table, validating the date-axis and row-shape invariants.
    pub fn new(
        dates: Vec<NaiveDate>,
        symbols: Vec<String>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, TableError> {
        if rows.len() != dates.len() {
            return Err(TableError::RowCountMismatch {
                rows: rows.len(),
                dates: dates.len(),
            });
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != symbols.len() {
                return Err(TableError::RowWidthMismatch {
                    row: i,
                    cells: row.len(),
                    symbols: symbols.len(),
                });
            }
        }
        for (i, pair) in dates.windows(2).enumerate() {
            if pair[0] >= pair[1] {
                return Err(TableError::UnsortedDates {
                    row: i + 1,
                    prev: pair[0],
                    curr: pair[1],
                });
            }
        }
        Ok(Self {
            dates,
            symbols,
            rows,
        })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Number of daily rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of symbol columns.
    pub fn width(&self) -> usize {
        self.symbols.len()
    }

    /// Price cell at (row, column); NaN means missing.
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// Full price row for a date index.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.rows[row]
    }

    /// Sub-table containing only the columns named in `keep`, preserving this
    /// table's column order. Symbols in `keep` that this table does not carry
    /// are ignored (set intersection).
    pub fn select_symbols(&self, keep: &HashSet<String>) -> PriceTable {
        let cols: Vec<usize> = self
            .symbols
            .iter()
            .enumerate()
            .filter(|(_, s)| keep.contains(*s))
            .map(|(i, _)| i)
            .collect();

        let symbols = cols.iter().map(|&i| self.symbols[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| cols.iter().map(|&i| row[i]).collect())
            .collect();

        PriceTable {
            dates: self.dates.clone(),
            symbols,
            rows,
        }
    }

    /// Sub-table restricted to the inclusive date range [start, end].
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> PriceTable {
        let lo = self.dates.partition_point(|d| *d < start);
        let hi = self.dates.partition_point(|d| *d <= end);

        PriceTable {
            dates: self.dates[lo..hi].to_vec(),
            symbols: self.symbols.clone(),
            rows: self.rows[lo..hi].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_table() -> PriceTable {
        PriceTable::new(
            vec![date("2001-01-02"), date("2001-01-03"), date("2001-02-01")],
            vec!["AAA".into(), "BBB".into(), "CCC".into()],
            vec![
                vec![100.0, 200.0, 50.0],
                vec![101.0, f64::NAN, 51.0],
                vec![102.0, 198.0, 52.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn rejects_unsorted_dates() {
        let err = PriceTable::new(
            vec![date("2001-01-03"), date("2001-01-02")],
            vec!["AAA".into()],
            vec![vec![1.0], vec![2.0]],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::UnsortedDates { row: 1, .. }));
    }

    #[test]
    fn rejects_duplicate_dates() {
        let err = PriceTable::new(
            vec![date("2001-01-02"), date("2001-01-02")],
            vec!["AAA".into()],
            vec![vec![1.0], vec![2.0]],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::UnsortedDates { .. }));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = PriceTable::new(
            vec![date("2001-01-02")],
            vec!["AAA".into(), "BBB".into()],
            vec![vec![1.0]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TableError::RowWidthMismatch {
                row: 0,
                cells: 1,
                symbols: 2
            }
        );
    }

    #[test]
    fn select_symbols_preserves_table_order() {
        let table = sample_table();
        let keep: HashSet<String> = ["CCC".to_string(), "AAA".to_string()].into_iter().collect();

        let sub = table.select_symbols(&keep);
        assert_eq!(sub.symbols(), &["AAA".to_string(), "CCC".to_string()]);
        assert_eq!(sub.row(0), &[100.0, 50.0]);
        assert_eq!(sub.len(), 3);
    }

    #[test]
    fn select_symbols_ignores_unknown() {
        let table = sample_table();
        let keep: HashSet<String> = ["AAA".to_string(), "ZZZ".to_string()].into_iter().collect();

        let sub = table.select_symbols(&keep);
        assert_eq!(sub.width(), 1);
    }

    #[test]
    fn between_is_inclusive() {
        let table = sample_table();
        let sub = table.between(date("2001-01-03"), date("2001-02-01"));
        assert_eq!(sub.dates(), &[date("2001-01-03"), date("2001-02-01")]);
        assert_eq!(sub.row(0)[0], 101.0);
    }

    #[test]
    fn between_outside_range_is_empty() {
        let table = sample_table();
        let sub = table.between(date("2005-01-01"), date("2006-01-01"));
        assert!(sub.is_empty());
        assert_eq!(sub.width(), 3);
    }

    #[test]
    fn nan_cell_survives_selection() {
        let table = sample_table();
        let keep: HashSet<String> = ["BBB".to_string()].into_iter().collect();
        let sub = table.select_symbols(&keep);
        assert!(sub.value(1, 0).is_nan());
    }
}
