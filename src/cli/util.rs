//! CLI Common Utilities
//!
//! Shared context for command handlers.

use crate::cli::ui::Output;
use crate::config::{Config, ConfigLoader};
use crate::types::Result;

/// Command execution context
pub struct CommandContext {
    /// Effective configuration
    pub config: Config,
    /// Console notifications
    pub output: Output,
}

impl CommandContext {
    /// Load the layered configuration
    pub fn load(quiet: bool) -> Result<Self> {
        Ok(Self::with_config(ConfigLoader::load()?, quiet))
    }

    pub fn with_config(config: Config, quiet: bool) -> Self {
        Self {
            config,
            output: Output::new().quiet(quiet),
        }
    }
}

/// `true` when a `--format` value asks for JSON
pub fn is_json(format: &str) -> bool {
    format.eq_ignore_ascii_case("json")
}
