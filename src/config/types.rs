//! Configuration Types
//!
//! All configuration structures with their defaults.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{simulator as sim, store as store_constants};
use crate::docs::MarkdownView;
use crate::types::{DocError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Pipeline simulator timing
    pub simulator: SimulatorConfig,

    /// In-memory store behaviour
    pub store: StoreConfig,

    /// Repository import settings
    pub import: ImportConfig,

    /// Documentation output settings
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            simulator: SimulatorConfig::default(),
            store: StoreConfig::default(),
            import: ImportConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `DocError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        self.simulator.validate()
    }
}

// =============================================================================
// Simulator Configuration
// =============================================================================

/// Timing of the documentation pipeline simulator.
///
/// Delays are expressed in abstract time units; `time_unit_ms` converts them
/// to wall-clock time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimulatorConfig {
    pub time_unit_ms: u64,
    pub start_delay: u64,
    pub read_delay_min: u64,
    pub read_delay_max: u64,
    pub advance_delay_min: u64,
    pub advance_delay_max: u64,
    pub completion_delay: u64,
    /// Fixed seed for phase messages and delays; random when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            time_unit_ms: sim::DEFAULT_TIME_UNIT_MS,
            start_delay: sim::START_DELAY,
            read_delay_min: sim::READ_DELAY_MIN,
            read_delay_max: sim::READ_DELAY_MAX,
            advance_delay_min: sim::ADVANCE_DELAY_MIN,
            advance_delay_max: sim::ADVANCE_DELAY_MAX,
            completion_delay: sim::COMPLETION_DELAY,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.time_unit_ms == 0 {
            return Err(DocError::Config(
                "simulator.time_unit_ms must be greater than 0".to_string(),
            ));
        }

        if self.read_delay_min >= self.read_delay_max {
            return Err(DocError::Config(format!(
                "simulator.read_delay_min ({}) must be less than read_delay_max ({})",
                self.read_delay_min, self.read_delay_max
            )));
        }

        if self.advance_delay_min >= self.advance_delay_max {
            return Err(DocError::Config(format!(
                "simulator.advance_delay_min ({}) must be less than advance_delay_max ({})",
                self.advance_delay_min, self.advance_delay_max
            )));
        }

        Ok(())
    }

    pub fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }
}

// =============================================================================
// Store Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// Simulated latency of documentation generation (milliseconds)
    pub generation_latency_ms: u64,
    /// Seed a fresh store with the sample project
    pub seed_sample_project: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            generation_latency_ms: store_constants::GENERATION_LATENCY_MS,
            seed_sample_project: true,
        }
    }
}

impl StoreConfig {
    pub fn generation_latency(&self) -> Duration {
        Duration::from_millis(self.generation_latency_ms)
    }
}

// =============================================================================
// Import Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ImportConfig {
    /// Build trees for local repositories from the filesystem instead of the
    /// mock structure
    pub scan_local_paths: bool,
    /// Glob patterns left out of scanned trees
    pub exclude: Vec<String>,
}

// =============================================================================
// Output Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory downloads are written to
    pub dir: PathBuf,
    /// Default documentation view
    pub view: MarkdownView,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            view: MarkdownView::Preview,
        }
    }
}
