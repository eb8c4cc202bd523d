use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::error::{DashboardError, Result};

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV: &str = "PRICE_DASHBOARD_CONFIG";
/// Environment variable overriding the dataset path.
pub const DATA_ENV: &str = "PRICE_DASHBOARD_DATA";

pub const DEFAULT_DATA_PATH: &str = "domestic_industrial_price_index_clean.csv";
pub const DEFAULT_SECTOR_COUNT: usize = 5;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup settings. Every field has a default so a partial JSON file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Source dataset (`.csv`, `.parquet` or `.json`).
    pub data_path: PathBuf,
    /// How many sectors (alphabetical) are pre-selected on load.
    pub default_sector_count: usize,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            default_sector_count: DEFAULT_SECTOR_COUNT,
            window_width: 1400.0,
            window_height: 900.0,
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let parsed = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))
            .and_then(|text| {
                serde_json::from_str::<Self>(&text)
                    .with_context(|| format!("parsing config {}", path.display()))
            });
        parsed.map_err(|e| DashboardError::Config(format!("{e:#}")))
    }

    /// Resolve the effective configuration.
    ///
    /// Precedence (lowest first): defaults, the file named by
    /// [`CONFIG_ENV`], the [`DATA_ENV`] variable, then `cli_data_path`.
    pub fn resolve(
        config_file: Option<&Path>,
        env_data_path: Option<&str>,
        cli_data_path: Option<&str>,
    ) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(p) = env_data_path.filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(p);
        }
        if let Some(p) = cli_data_path.filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(p);
        }
        Ok(config)
    }

    /// [`DashboardConfig::resolve`] fed from the process environment and arguments.
    pub fn from_env() -> Result<Self> {
        let config_file = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let env_data = std::env::var(DATA_ENV).ok();
        let cli_data = std::env::args().nth(1);
        Self::resolve(
            config_file.as_deref(),
            env_data.as_deref(),
            cli_data.as_deref(),
        )
    }
}
