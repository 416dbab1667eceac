//! PartyLab Runner — analysis orchestration, reporting, artifacts.
//!
//! This crate builds on `partylab-core` to provide:
//! - TOML analysis configuration with content-addressed run IDs
//! - Single-universe and multi-sector analysis drivers (sectors in parallel)
//! - The raw-change distribution histogram
//! - Markdown report generation
//! - CSV/JSON artifact bundles per analysis

pub mod artifacts;
pub mod config;
pub mod histogram;
pub mod report;
pub mod result;
pub mod runner;

pub use artifacts::{save_artifacts, ArtifactPaths};
pub use config::{AnalysisConfig, ConfigError, RunId};
pub use histogram::Histogram;
pub use report::MarkdownReport;
pub use result::{AnalysisResult, SCHEMA_VERSION};
pub use runner::{run_all, run_analysis, AnalysisOutcome, RunError};
