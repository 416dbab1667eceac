//! Artifact bundle — persisted outputs for one analysis.
//!
//! Layout under the output directory:
//! `<run_id>/<title_slug>/` containing
//! - `manifest.json` — the full serialized `AnalysisResult`
//! - `party_seasonality.csv` — democrat vs republican paired rows
//! - `transition_seasonality.csv` — dem→rep vs rep→dem paired rows
//! - `histogram.csv` — bin starts and counts
//! - `report.md` — rendered markdown report
//!
//! The run directory is the config hash, so identical configs overwrite
//! their own artifacts instead of accumulating timestamped copies.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::histogram::Histogram;
use crate::report::MarkdownReport;
use crate::result::AnalysisResult;
use partylab_core::pipeline::PairedRow;

/// Paths written for one analysis.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub dir: PathBuf,
    pub manifest: PathBuf,
    pub party_csv: PathBuf,
    pub transition_csv: PathBuf,
    pub histogram_csv: PathBuf,
    pub report: PathBuf,
}

/// Save the full artifact set for one analysis result.
pub fn save_artifacts(result: &AnalysisResult, output_dir: &Path) -> Result<ArtifactPaths> {
    let dir = output_dir.join(&result.run_id).join(slug(&result.title));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create artifact directory {}", dir.display()))?;

    let manifest = dir.join("manifest.json");
    let json = serde_json::to_string_pretty(result).context("failed to serialize result")?;
    std::fs::write(&manifest, json)
        .with_context(|| format!("failed to write {}", manifest.display()))?;

    let party_csv = dir.join("party_seasonality.csv");
    std::fs::write(
        &party_csv,
        export_paired_csv(&result.party_rows, "democrat", "republican")?,
    )
    .with_context(|| format!("failed to write {}", party_csv.display()))?;

    let transition_csv = dir.join("transition_seasonality.csv");
    std::fs::write(
        &transition_csv,
        export_paired_csv(&result.transition_rows, "dem_to_rep", "rep_to_dem")?,
    )
    .with_context(|| format!("failed to write {}", transition_csv.display()))?;

    let histogram_csv = dir.join("histogram.csv");
    std::fs::write(&histogram_csv, export_histogram_csv(&result.histogram)?)
        .with_context(|| format!("failed to write {}", histogram_csv.display()))?;

    let report = dir.join("report.md");
    std::fs::write(&report, MarkdownReport::generate(result))
        .with_context(|| format!("failed to write {}", report.display()))?;

    Ok(ArtifactPaths {
        dir,
        manifest,
        party_csv,
        transition_csv,
        histogram_csv,
        report,
    })
}

/// Paired seasonal rows as CSV.
///
/// Columns: month, `{a}_mean`, `{a}_std_error`, `{b}_mean`, `{b}_std_error`.
pub fn export_paired_csv(rows: &[PairedRow], a_name: &str, b_name: &str) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "month".to_string(),
        format!("{a_name}_mean"),
        format!("{a_name}_std_error"),
        format!("{b_name}_mean"),
        format!("{b_name}_std_error"),
    ])?;

    for row in rows {
        wtr.write_record([
            row.month.clone(),
            format!("{:.10}", row.a_mean),
            format!("{:.10}", row.a_std_error),
            format!("{:.10}", row.b_mean),
            format!("{:.10}", row.b_std_error),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Histogram as CSV. Columns: bin_start, count.
pub fn export_histogram_csv(histogram: &Histogram) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["bin_start", "count"])?;
    for (i, count) in histogram.counts.iter().enumerate() {
        wtr.write_record([
            format!("{:.10}", histogram.bin_start(i)),
            count.to_string(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Directory-safe slug: lowercase alphanumerics, everything else collapsed
/// to single underscores.
fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last_was_sep = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            out.push('_');
            last_was_sep = true;
        }
    }
    out.trim_end_matches('_').to_string()
}
