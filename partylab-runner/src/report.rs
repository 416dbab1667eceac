//! Markdown report generator.
//!
//! Renders the numeric series as tables; no chart rasterization. The report
//! is derived presentation — the values themselves live in the manifest and
//! CSV artifacts.

use crate::result::AnalysisResult;
use partylab_core::pipeline::{PairedRow, SeasonalStats};

pub struct MarkdownReport;

impl MarkdownReport {
    pub fn generate(result: &AnalysisResult) -> String {
        let mut report = format!(
            "# {}\n\n\
Run ID: `{}`\n\n\
- Period: {} to {}\n\
- Symbols: {}\n\
- Months after outlier clamp: {}\n",
            result.title,
            result.run_id,
            result.start_date,
            result.end_date,
            result.symbol_count,
            result.month_count,
        );

        report.push_str("\n## Democrat vs Republican Months\n\n");
        push_paired_table(&mut report, &result.party_rows, "democrat", "republican");

        report.push_str("\n## Transition Months\n\n");
        push_paired_table(&mut report, &result.transition_rows, "dem to rep", "rep to dem");

        report.push_str("\n## Overall Seasonality\n\n");
        push_seasonal_table(&mut report, &result.overall);

        report.push_str("\n## Monthly Change Distribution\n\n");
        push_histogram(&mut report, result);

        if !result.warnings.is_empty() {
            report.push_str("\n## Warnings\n\n");
            for warning in &result.warnings {
                report.push_str(&format!("- {warning}\n"));
            }
        }

        report
    }
}

fn push_paired_table(report: &mut String, rows: &[PairedRow], a_name: &str, b_name: &str) {
    if rows.is_empty() {
        report.push_str("No calendar months survive the paired filter.\n");
        return;
    }
    report.push_str(&format!(
        "| Month | {a_name} mean | {a_name} std err | {b_name} mean | {b_name} std err |\n\
         |-------|------:|------:|------:|------:|\n"
    ));
    for row in rows {
        report.push_str(&format!(
            "| {} | {:+.4} | {:.4} | {:+.4} | {:.4} |\n",
            row.month, row.a_mean, row.a_std_error, row.b_mean, row.b_std_error
        ));
    }
}

fn push_seasonal_table(report: &mut String, stats: &SeasonalStats) {
    report.push_str(
        "| Month | Mean | Std err | Observations |\n\
         |-------|-----:|--------:|-------------:|\n",
    );
    for i in 0..12 {
        let label = SeasonalStats::month_label(i);
        if stats.counts[i] == 0 {
            report.push_str(&format!("| {label} | — | — | 0 |\n"));
        } else {
            report.push_str(&format!(
                "| {} | {:+.4} | {:.4} | {} |\n",
                label, stats.means[i], stats.std_errors[i], stats.counts[i]
            ));
        }
    }
}

fn push_histogram(report: &mut String, result: &AnalysisResult) {
    let hist = &result.histogram;
    if hist.is_empty() {
        report.push_str("No observations.\n");
        return;
    }

    let max_count = hist.counts.iter().copied().max().unwrap_or(1).max(1);
    report.push_str(&format!(
        "{} observations in [{:.4}, {:.4}]\n\n```\n",
        hist.total, hist.min, hist.max
    ));
    // Collapse the fine-grained bins to a readable 20-row profile.
    let step = hist.counts.len().div_ceil(20);
    for chunk_start in (0..hist.counts.len()).step_by(step) {
        let chunk_end = (chunk_start + step).min(hist.counts.len());
        let count: u64 = hist.counts[chunk_start..chunk_end].iter().sum();
        let bar_len = ((count as f64 / max_count as f64) * 40.0).round() as usize;
        report.push_str(&format!(
            "{:+.3} | {:<40} {}\n",
            hist.bin_start(chunk_start),
            "#".repeat(bar_len),
            count
        ));
    }
    report.push_str("```\n");
}
