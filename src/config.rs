//! Configuration management and validation.
//!
//! Provides the caller-layer settings used when ripping files: error policy,
//! output renames, parallelism and output formatting. Settings load from a
//! JSON document and are then overridden by command-line flags.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::app::models::FieldNameMap;
use crate::app::services::record_parser::ErrorPolicy;
use crate::constants::MAX_WORKERS;
use crate::error::{Result, RipperError};

/// Global configuration for ripping files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RipperConfig {
    /// What to do with records that fail to parse
    pub error_policy: ErrorPolicy,

    /// Number of files ripped concurrently
    pub workers: usize,

    /// Output field renames applied after extraction
    pub renames: FieldNameMap,

    /// Pretty-print JSON output instead of one record per line
    pub pretty_output: bool,
}

impl Default for RipperConfig {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::default(),
            workers: num_cpus::get().min(MAX_WORKERS),
            renames: FieldNameMap::default(),
            pretty_output: false,
        }
    }
}

impl RipperConfig {
    /// Load configuration from a JSON file; missing keys take defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RipperError::io(path, e))?;
        let config = Self::from_json_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| RipperError::schema("Failed to decode ripper configuration", e))
    }

    /// Create configuration with a custom error policy
    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Replace the output renames
    pub fn with_renames(mut self, renames: FieldNameMap) -> Self {
        self.renames = renames;
        self
    }

    /// Enable pretty JSON output
    pub fn with_pretty_output(mut self) -> Self {
        self.pretty_output = true;
        self
    }

    /// Check settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(RipperError::configuration(format!(
                "workers must be between 1 and {}, got {}",
                MAX_WORKERS, self.workers
            )));
        }
        Ok(())
    }
}
