use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

use crate::underwriting::DEFAULT_ANNUAL_RATE;

pub const DATA_DIR_VAR: &str = "CREDFLOW_DATA_DIR";
pub const LOG_VAR: &str = "CREDFLOW_LOG";
pub const RATE_VAR: &str = "CREDFLOW_ANNUAL_RATE";
pub const DEFAULT_LOG_FILTER: &str = "warn";

const DB_FILE: &str = "credflow.db";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_filter: String,
    pub annual_rate: Decimal,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any variable source; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = match get(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let log_filter = get(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let annual_rate = match get(RATE_VAR) {
            Some(raw) => {
                let rate = Decimal::from_str(raw.trim())
                    .with_context(|| format!("{RATE_VAR}: '{raw}' is not a number"))?;
                if rate < Decimal::ZERO {
                    anyhow::bail!("{RATE_VAR}: rate cannot be negative (got {rate})");
                }
                rate
            }
            None => DEFAULT_ANNUAL_RATE,
        };

        Ok(Self {
            data_dir,
            log_filter,
            annual_rate,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    /// Create the data directory if needed and return the database path.
    pub fn ensure_db_path(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                self.data_dir.display()
            )
        })?;
        Ok(self.db_path())
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "credflow", "credflow")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
