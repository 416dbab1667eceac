//! PartyLab CLI — run the presidential-party market seasonality analysis.
//!
//! Commands:
//! - `run` — execute every configured analysis (full table + sectors) and
//!   save the artifact bundles
//! - `sample-config` — print an annotated starter config to stdout

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use partylab_runner::{run_all, save_artifacts, AnalysisConfig, AnalysisResult};

#[derive(Parser)]
#[command(
    name = "partylab",
    about = "Does the market care which party holds the presidency? Monthly seasonality by party and transition."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute all configured analyses and save artifacts.
    Run {
        /// Path to the TOML analysis config.
        #[arg(long)]
        config: PathBuf,

        /// Override the config's output directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Print a starter config file to stdout.
    SampleConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output_dir } => run_cmd(&config, output_dir),
        Commands::SampleConfig => {
            print!("{SAMPLE_CONFIG}");
            Ok(())
        }
    }
}

fn run_cmd(config_path: &Path, output_dir: Option<PathBuf>) -> Result<()> {
    let mut config = AnalysisConfig::from_file(config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    if let Some(dir) = output_dir {
        config.output.dir = dir;
    }

    println!("Run ID: {}", config.run_id());
    println!(
        "Analyzing {} from {} to {}",
        config.data.prices.display(),
        config.data.start_date,
        config.data.end_date
    );

    let outcomes = run_all(&config).context("analysis run failed")?;

    let mut failed = 0usize;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(result) => {
                print_summary(result);
                let paths = save_artifacts(result, &config.output.dir)?;
                println!("Artifacts saved to: {}", paths.dir.display());
            }
            Err(e) => {
                eprintln!("Analysis '{}' failed: {e}", outcome.title);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        eprintln!(
            "\n{failed} of {} analyses failed; artifacts written for the rest.",
            outcomes.len()
        );
        std::process::exit(1);
    }
    Ok(())
}

fn print_summary(result: &AnalysisResult) {
    println!();
    println!("=== {} ===", result.title);
    println!(
        "Period:   {} to {}",
        result.start_date, result.end_date
    );
    println!("Symbols:  {}", result.symbol_count);
    println!("Months:   {} (after outlier clamp)", result.month_count);

    if result.party_rows.is_empty() {
        println!("No calendar months survive the democrat/republican pairing.");
    } else {
        println!();
        println!(
            "{:<6} {:>10} {:>10} {:>10} {:>10}",
            "Month", "Dem mean", "Dem err", "Rep mean", "Rep err"
        );
        for row in &result.party_rows {
            println!(
                "{:<6} {:>+10.4} {:>10.4} {:>+10.4} {:>10.4}",
                row.month, row.a_mean, row.a_std_error, row.b_mean, row.b_std_error
            );
        }
    }

    for warning in &result.warnings {
        println!("WARNING: {warning}");
    }
}

const SAMPLE_CONFIG: &str = r#"# PartyLab analysis configuration.

[data]
# Wide daily price CSV: date column + one adjusted-close column per symbol.
prices = "stocks-us-adjClose.csv"
# Monthly party labels: date, party ("republican" or anything = democrat),
# transition code (0 = none, 1 = dem->rep, 2 = rep->dem).
party = "pres_party_by_month.csv"
start_date = "1980-01-01"
end_date = "2018-01-01"

[filter]
# Monthly averages with |change| at or beyond this are dropped as bad ticks.
max_abs_change = 0.5

# Each sector is analyzed as its own universe, in addition to the full table.
[[sector]]
name = "Healthcare"
symbols = "healthcaresector.csv"

[[sector]]
name = "Energy"
symbols = "energysector.csv"

[[sector]]
name = "Basic Industries"
symbols = "basicindustriessector.csv"

[output]
dir = "results"
"#;
