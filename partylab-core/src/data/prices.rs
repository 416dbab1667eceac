//! Wide price-table CSV loader.
//!
//! Layout: header row `date,SYM1,SYM2,...`; each data row is an ISO date
//! followed by one adjusted-close price per symbol. Empty cells are missing
//! observations and become NaN.

use super::{parse_date_cell, DataError};
use crate::domain::{PriceTable, TableError};
use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load a price table from a CSV file on disk.
pub fn load_price_table(path: &Path) -> Result<PriceTable, DataError> {
    let file = File::open(path).map_err(|e| DataError::open(path, e))?;
    read_price_table(file, path)
}

/// Read a price table from any reader. `path` is used for error context only.
pub fn read_price_table<R: Read>(reader: R, path: &Path) -> Result<PriceTable, DataError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = csv.headers().map_err(|e| csv_err(path, 1, e))?.clone();
    if headers.len() < 2 {
        return Err(DataError::row(
            path,
            1,
            "header must have a date column and at least one symbol column",
        ));
    }
    let symbols: Vec<String> = headers.iter().skip(1).map(|s| s.trim().to_string()).collect();

    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (i, record) in csv.records().enumerate() {
        let line = i + 2; // 1-based, after the header
        let record = record.map_err(|e| csv_err(path, line, e))?;

        let date = parse_date_cell(&record[0])
            .ok_or_else(|| DataError::row(path, line, format!("unparseable date '{}'", &record[0])))?;

        let mut row = Vec::with_capacity(symbols.len());
        for (col, cell) in record.iter().skip(1).enumerate() {
            row.push(parse_price_cell(cell).ok_or_else(|| {
                DataError::row(
                    path,
                    line,
                    format!("non-numeric price '{}' for symbol {}", cell, symbols[col]),
                )
            })?);
        }

        dates.push(date);
        rows.push(row);
    }

    if dates.is_empty() {
        return Err(DataError::Empty {
            path: path.to_path_buf(),
        });
    }

    PriceTable::new(dates, symbols, rows).map_err(|e| match e {
        TableError::UnsortedDates { row, prev, curr } => DataError::row(
            path,
            row + 2,
            format!("date {curr} is not after {prev}"),
        ),
        other => DataError::row(path, 0, other.to_string()),
    })
}

/// Empty cell → NaN (missing observation); otherwise must parse as a float.
fn parse_price_cell(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

fn csv_err(path: &Path, line: usize, e: csv::Error) -> DataError {
    DataError::row(path, line, e.to_string())
}
