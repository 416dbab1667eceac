//! Serializable analysis configuration.
//!
//! Everything the analysis depends on — file paths, date range, outlier
//! bound, sector list — lives here, loaded from a TOML file. Nothing is
//! read from process-wide state.

use chrono::NaiveDate;
use partylab_core::pipeline::ChangeBound;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unique identifier for an analysis run (content-addressable hash).
pub type RunId = String;

/// Complete configuration for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    pub data: DataConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    /// Sector membership files, each analyzed as its own universe in
    /// addition to the full table.
    #[serde(default)]
    pub sector: Vec<SectorConfig>,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Input file paths and the inclusive date range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// Wide daily price CSV (date column + one column per symbol).
    pub prices: PathBuf,
    /// Monthly party label CSV (date, party, transition code).
    pub party: PathBuf,
    /// Inclusive start of the analysis window.
    pub start_date: NaiveDate,
    /// Inclusive end of the analysis window.
    pub end_date: NaiveDate,
}

/// Outlier clamp settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FilterConfig {
    /// Monthly averages with |value| at or beyond this are discarded as bad
    /// ticks, both per-month and again on per-bucket means.
    pub max_abs_change: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_abs_change: ChangeBound::DEFAULT_MAX_ABS,
        }
    }
}

/// One named sector universe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectorConfig {
    pub name: String,
    /// Membership CSV (first column = ticker symbol).
    pub symbols: PathBuf,
}

/// Where artifacts are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("results"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl AnalysisConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.data.start_date > self.data.end_date {
            return Err(ConfigError::Invalid(format!(
                "start_date {} is after end_date {}",
                self.data.start_date, self.data.end_date
            )));
        }
        if self.filter.max_abs_change <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "max_abs_change must be positive, got {}",
                self.filter.max_abs_change
            )));
        }
        let mut names: Vec<&str> = self.sector.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        if names.len() != self.sector.len() {
            return Err(ConfigError::Invalid("duplicate sector names".into()));
        }
        Ok(())
    }

    /// The outlier clamp policy this config describes.
    pub fn bound(&self) -> ChangeBound {
        ChangeBound::new(self.filter.max_abs_change)
    }

    /// Deterministic hash ID for this configuration. Identical configs get
    /// identical IDs, so re-runs land in the same artifact directory.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
