//! Analysis drivers.
//!
//! `run_analysis` executes the pipeline for one universe (the full table or
//! one sector). `run_all` loads the inputs once and fans out across the
//! configured universes; each analysis is independent and side-effect-free,
//! so failures are reported per universe without corrupting the others.

use partylab_core::data::{
    load_party_labels, load_price_table, DataError, SectorMembership,
};
use partylab_core::domain::{PartyLabelSeries, PriceTable};
use partylab_core::pipeline::{
    align_labels, average_changes, bin_by_party, clamp_outliers, paired_rows, percent_changes,
    resample_monthly, AlignmentError, ChangeBound, SeasonalStats,
};
use rayon::prelude::*;
use thiserror::Error;

use crate::config::{AnalysisConfig, ConfigError};
use crate::histogram::{Histogram, DEFAULT_BINS};
use crate::result::{AnalysisResult, SCHEMA_VERSION};

/// Errors from a single analysis run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Alignment(#[from] AlignmentError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("'{title}': no monthly observations in the selected date range")]
    NoObservations { title: String },
}

/// Outcome of one universe within a multi-analysis run.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub title: String,
    pub result: Result<AnalysisResult, RunError>,
}

/// Run the full pipeline for one universe.
///
/// Pure with respect to its inputs: no I/O, no global state, deterministic
/// output.
pub fn run_analysis(
    title: &str,
    table: &PriceTable,
    labels: &PartyLabelSeries,
    bound: ChangeBound,
) -> Result<AnalysisResult, RunError> {
    let monthly = resample_monthly(table);
    let changes = percent_changes(&monthly);
    let averages = clamp_outliers(&average_changes(&changes), &bound);

    if averages.is_empty() {
        return Err(RunError::NoObservations {
            title: title.to_string(),
        });
    }

    let aligned = align_labels(labels, &averages)?;
    let bins = bin_by_party(&averages, &aligned)?;

    let overall = SeasonalStats::from_buckets(&bins.overall);
    let democrat = SeasonalStats::from_buckets(&bins.democrat);
    let republican = SeasonalStats::from_buckets(&bins.republican);
    let dem_to_rep = SeasonalStats::from_buckets(&bins.dem_to_rep);
    let rep_to_dem = SeasonalStats::from_buckets(&bins.rep_to_dem);

    let party_rows = paired_rows(&democrat, &republican, &bound);
    let transition_rows = paired_rows(&dem_to_rep, &rep_to_dem, &bound);

    let values: Vec<f64> = averages.iter().map(|p| p.value).collect();
    let histogram = Histogram::from_values(&values, DEFAULT_BINS);

    let mut warnings = Vec::new();
    for (name, stats) in [
        ("overall", &overall),
        ("democrat", &democrat),
        ("republican", &republican),
        ("dem_to_rep", &dem_to_rep),
        ("rep_to_dem", &rep_to_dem),
    ] {
        let empty = stats.undefined_months();
        if empty > 0 {
            warnings.push(format!(
                "{name}: {empty} of 12 calendar-month buckets are empty; those rows are undefined and excluded from paired output"
            ));
        }
    }

    let dates = table.dates();
    Ok(AnalysisResult {
        schema_version: SCHEMA_VERSION,
        title: title.to_string(),
        run_id: String::new(),
        start_date: dates.first().copied().unwrap_or_default(),
        end_date: dates.last().copied().unwrap_or_default(),
        symbol_count: table.width(),
        month_count: averages.len(),
        overall,
        democrat,
        republican,
        dem_to_rep,
        rep_to_dem,
        party_rows,
        transition_rows,
        histogram,
        warnings,
    })
}

/// Load inputs and run every configured universe: the full table first, then
/// each sector, in parallel. Input-loading failures are fatal; per-universe
/// failures are reported in that universe's outcome.
pub fn run_all(config: &AnalysisConfig) -> Result<Vec<AnalysisOutcome>, RunError> {
    let table = load_price_table(&config.data.prices)?
        .between(config.data.start_date, config.data.end_date);
    let labels = load_party_labels(&config.data.party)?
        .between(config.data.start_date, config.data.end_date);
    let bound = config.bound();
    let run_id = config.run_id();

    // Universe list: full table plus one entry per sector.
    let mut universes: Vec<(String, Option<&std::path::Path>)> =
        vec![("All Data".to_string(), None)];
    for sector in &config.sector {
        universes.push((format!("{} Sector", sector.name), Some(sector.symbols.as_path())));
    }

    let outcomes: Vec<AnalysisOutcome> = universes
        .into_par_iter()
        .map(|(title, membership_path)| {
            let result = run_universe(&title, &table, &labels, bound, membership_path).map(
                |mut result| {
                    result.run_id = run_id.clone();
                    result
                },
            );
            AnalysisOutcome { title, result }
        })
        .collect();

    Ok(outcomes)
}

fn run_universe(
    title: &str,
    table: &PriceTable,
    labels: &PartyLabelSeries,
    bound: ChangeBound,
    membership_path: Option<&std::path::Path>,
) -> Result<AnalysisResult, RunError> {
    match membership_path {
        None => run_analysis(title, table, labels, bound),
        Some(path) => {
            let membership = SectorMembership::from_file(path)?;
            let sector_table = membership.restrict(table);
            run_analysis(title, &sector_table, labels, bound)
        }
    }
}
