//! Engine configuration.
//!
//! Loaded from TOML; every field has a default so a partial file is valid.
//!
//! ```toml
//! name = "tessera"
//! min_publish_interval_ms = 1000
//! lanes = 4
//! lane_capacity = 1024
//! broadcast_capacity = 1024
//! log_filter = "info,tessera=debug"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Pricing engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine name/identifier
    pub name: String,

    /// Minimum time between two published snapshots of one instrument
    pub min_publish_interval_ms: u64,

    /// Number of single-writer lanes
    pub lanes: usize,

    /// Queue depth of each lane
    pub lane_capacity: usize,

    /// Buffer of the in-process snapshot output channel
    pub broadcast_capacity: usize,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: "tessera-engine".to_string(),
            min_publish_interval_ms: 1000,
            lanes: 4,
            lane_capacity: 1024,
            broadcast_capacity: 1024,
            log_filter: "info,tessera=debug".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        let config: EngineConfig =
            toml::from_str(content).map_err(|e| EngineError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the engine cannot run with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.lanes == 0 {
            return Err(EngineError::configuration("lanes must be at least 1"));
        }
        if self.lane_capacity == 0 {
            return Err(EngineError::configuration("lane_capacity must be at least 1"));
        }
        if self.broadcast_capacity == 0 {
            return Err(EngineError::configuration(
                "broadcast_capacity must be at least 1",
            ));
        }
        Ok(())
    }

    /// Throttle window as signed milliseconds.
    pub fn min_publish_interval_millis(&self) -> i64 {
        i64::try_from(self.min_publish_interval_ms).unwrap_or(i64::MAX)
    }
}
