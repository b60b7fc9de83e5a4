use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_TICKS_PER_QUARTER: u16 = 480;
pub const DEFAULT_DURATION_SECS: f64 = 30.0;
pub const DEFAULT_SEED: u64 = 0xC0FFEE;

/// Highest metrical division; the top bit of the field selects SMPTE timing.
pub const MAX_TICKS_PER_QUARTER: u16 = 0x7FFF;

/// Composer settings, loadable from JSON. Missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Division written to the header (PPQN).
    pub ticks_per_quarter: u16,
    /// Length used when the caller does not ask for one.
    pub default_duration_secs: f64,
    /// Seed for the melody drift when the caller does not supply one.
    pub seed: u64,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        ComposerConfig {
            ticks_per_quarter: DEFAULT_TICKS_PER_QUARTER,
            default_duration_secs: DEFAULT_DURATION_SECS,
            seed: DEFAULT_SEED,
        }
    }
}

impl ComposerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_quarter == 0 || self.ticks_per_quarter > MAX_TICKS_PER_QUARTER {
            return Err(ConfigError::TicksPerQuarter(self.ticks_per_quarter));
        }
        Ok(())
    }
}

/// Read and validate a JSON config file.
pub fn load(path: &Path) -> Result<ComposerConfig, ConfigError> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    let config: ComposerConfig =
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
    config.validate()?;
    tracing::debug!(?config, path = %path.display(), "loaded composer config");
    Ok(config)
}
