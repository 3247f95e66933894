use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{GateError, Result};

/// Admission budget: at most `limit` calls over any window of `seconds`.
///
/// Both fields must be positive; construction and the file loaders fail fast
/// on a zero value so no half-built limiter ever exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    pub limit: u64,
    pub seconds: u64,
}

impl GateConfig {
    pub fn new(limit: u64, seconds: u64) -> Result<Self> {
        let config = Self { limit, seconds };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(GateError::InvalidLimit(self.limit));
        }
        if self.seconds == 0 {
            return Err(GateError::InvalidPeriod(self.seconds));
        }
        Ok(())
    }

    /// Emission interval between paced calls: `seconds / limit`.
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.seconds as f64 / self.limit as f64)
    }

    /// GCRA burst tolerance: `seconds - interval`. Zero when `limit == 1`.
    pub fn tolerance(&self) -> Duration {
        Duration::from_secs(self.seconds).saturating_sub(self.interval())
    }

    /// Load from a JSON or TOML file, dispatching on the extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            Some("toml") => Self::from_toml_file(path),
            _ => Err(GateError::Config(format!(
                "unsupported config format: {}",
                path.display()
            ))),
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: GateConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: GateConfig = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }
}
