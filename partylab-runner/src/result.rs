//! Analysis result — the numeric output contract.
//!
//! Everything a report or chart needs is here as plain numbers: the five
//! seasonal splits, the paired presentation rows, and the raw-change
//! histogram. Values must reproduce byte-for-byte across identical runs;
//! formatting is the report layer's problem.

use chrono::NaiveDate;
use partylab_core::pipeline::{PairedRow, SeasonalStats};
use serde::{Deserialize, Serialize};

use crate::histogram::Histogram;

/// Artifact schema version; bump when the serialized layout changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Full numeric output for one analysis universe (all data, or one sector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub schema_version: u32,
    /// Display title ("All Data", "Healthcare Sector", ...).
    pub title: String,
    /// Content hash of the config that produced this result; stamped by
    /// the multi-analysis driver.
    pub run_id: String,

    /// Actual date range of the analyzed table (after range filtering).
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Symbols in the analyzed universe.
    pub symbol_count: usize,
    /// Monthly averages surviving the outlier clamp.
    pub month_count: usize,

    pub overall: SeasonalStats,
    pub democrat: SeasonalStats,
    pub republican: SeasonalStats,
    pub dem_to_rep: SeasonalStats,
    pub rep_to_dem: SeasonalStats,

    /// Democrat vs republican rows surviving the paired clamp.
    pub party_rows: Vec<PairedRow>,
    /// Dem→rep vs rep→dem rows surviving the paired clamp.
    pub transition_rows: Vec<PairedRow>,

    /// Distribution of the surviving monthly averages.
    pub histogram: Histogram,

    /// Non-fatal data-quality notes (empty buckets etc.).
    pub warnings: Vec<String>,
}
