//! Configuration handling
//!
//! Configuration is stored in `.brewhouse/config.toml`. Every field has a
//! default, so a missing or partial file still yields a working setup.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Brewhouse process parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrewhouseConfig {
    /// Length of the fermentation stage in days
    pub fermentation_days: u32,

    /// Length of the conditioning stage in days
    pub conditioning_days: u32,

    /// Nominal time a batch spends on the bottling line, in hours.
    /// The bottling line is not a tracked vessel, so this is an estimate
    /// rather than a stored deadline.
    pub bottling_estimate_hours: u32,

    /// Bottle size in millilitres
    pub bottle_millilitres: u32,

    /// Largest batch volume accepted, in litres
    pub max_batch_litres: u32,
}

impl Default for BrewhouseConfig {
    fn default() -> Self {
        Self {
            fermentation_days: 28,
            conditioning_days: 14,
            bottling_estimate_hours: 12,
            bottle_millilitres: 500,
            max_batch_litres: 1000,
        }
    }
}

impl BrewhouseConfig {
    /// Loads configuration from a TOML file, falling back to defaults when
    /// the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Writes the configuration as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}
