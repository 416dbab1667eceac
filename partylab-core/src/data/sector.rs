//! Sector membership — a set of ticker symbols loaded from a screener CSV.
//!
//! The membership file's first column holds the symbols; every other column
//! is ignored. Membership is presence in that column.

use super::DataError;
use crate::domain::PriceTable;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Immutable set of ticker symbols defining one sector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorMembership {
    symbols: HashSet<String>,
}

impl SectorMembership {
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let file = File::open(path).map_err(|e| DataError::open(path, e))?;
        Self::from_reader(file, path)
    }

    /// `path` is used for error context only.
    pub fn from_reader<R: Read>(reader: R, path: &Path) -> Result<Self, DataError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut symbols = HashSet::new();
        for (i, record) in csv.records().enumerate() {
            let record = record.map_err(|e| DataError::row(path, i + 2, e.to_string()))?;
            let symbol = record
                .get(0)
                .map(str::trim)
                .unwrap_or_default();
            if !symbol.is_empty() {
                symbols.insert(symbol.to_string());
            }
        }

        if symbols.is_empty() {
            return Err(DataError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(Self { symbols })
    }

    pub fn from_symbols<I: IntoIterator<Item = String>>(symbols: I) -> Self {
        Self {
            symbols: symbols.into_iter().collect(),
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Sector-restricted view of a price table: the intersection of the
    /// table's columns with this membership, in table column order.
    pub fn restrict(&self, table: &PriceTable) -> PriceTable {
        table.select_symbols(&self.symbols)
    }
}
