//! Input-file loading — thin CSV wrappers around the domain types.
//!
//! Three sources:
//! - wide daily price table (date column + one column per symbol)
//! - sector membership lists (first column = ticker symbol)
//! - monthly party labels (date, party string, transition code)
//!
//! Every loader comes in a `read_*` form (any `io::Read`, used by tests) and
//! a `load_*` form (path on disk, used by the runner).

pub mod party;
pub mod prices;
pub mod sector;

pub use party::{load_party_labels, read_party_labels};
pub use prices::{load_price_table, read_price_table};
pub use sector::SectorMembership;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Structured errors for data loading.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("data file not found: {path}")]
    MissingFile { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}, line {line}: {reason}")]
    MalformedRow {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("{path}: no data rows")]
    Empty { path: PathBuf },
}

impl DataError {
    /// Map a file-open failure: NotFound gets its own error kind so the CLI
    /// can report a missing input distinctly from a permission problem.
    pub(crate) fn open(path: &Path, source: std::io::Error) -> DataError {
        if source.kind() == std::io::ErrorKind::NotFound {
            DataError::MissingFile {
                path: path.to_path_buf(),
            }
        } else {
            DataError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn row(path: &Path, line: usize, reason: impl Into<String>) -> DataError {
        DataError::MalformedRow {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }
}

/// Parse an ISO date cell (`YYYY-MM-DD`, or `YYYY-MM` for month-granularity
/// sources).
pub(crate) fn parse_date_cell(cell: &str) -> Option<chrono::NaiveDate> {
    let cell = cell.trim();
    chrono::NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .ok()
        .or_else(|| chrono::NaiveDate::parse_from_str(&format!("{cell}-01"), "%Y-%m-%d").ok())
}
