//! Party-label CSV loader.
//!
//! Layout: header row, then `date,party,transition` — a month-granularity
//! date, the party string (`"republican"` or anything else = democrat), and
//! the transition code (0 = none, 1 = dem→rep, 2 = rep→dem).

use super::{parse_date_cell, DataError};
use crate::domain::{Party, PartyLabel, PartyLabelSeries, Transition};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load a party label series from a CSV file on disk.
pub fn load_party_labels(path: &Path) -> Result<PartyLabelSeries, DataError> {
    let file = File::open(path).map_err(|e| DataError::open(path, e))?;
    read_party_labels(file, path)
}

/// Read a party label series from any reader. `path` is error context only.
pub fn read_party_labels<R: Read>(reader: R, path: &Path) -> Result<PartyLabelSeries, DataError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let mut labels = Vec::new();
    for (i, record) in csv.records().enumerate() {
        let line = i + 2;
        let record = record.map_err(|e| DataError::row(path, line, e.to_string()))?;
        if record.len() < 3 {
            return Err(DataError::row(
                path,
                line,
                format!("expected 3 columns (date,party,transition), got {}", record.len()),
            ));
        }

        let month = parse_date_cell(&record[0])
            .ok_or_else(|| DataError::row(path, line, format!("unparseable date '{}'", &record[0])))?;
        let party = Party::from_label(&record[1]);
        let code: u8 = record[2]
            .trim()
            .parse()
            .map_err(|_| DataError::row(path, line, format!("bad transition code '{}'", &record[2])))?;
        let transition = Transition::from_code(code).ok_or_else(|| {
            DataError::row(path, line, format!("transition code {code} not in {{0, 1, 2}}"))
        })?;

        labels.push(PartyLabel {
            month,
            party,
            transition,
        });
    }

    if labels.is_empty() {
        return Err(DataError::Empty {
            path: path.to_path_buf(),
        });
    }

    PartyLabelSeries::new(labels).ok_or_else(|| {
        DataError::row(path, 0, "label months are not strictly ascending".to_string())
    })
}
