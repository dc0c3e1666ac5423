//! Config Command
//!
//! Manage repodoc configuration.
//!
//! Usage:
//!   repodoc config show [-f json|toml]
//!   repodoc config path
//!   repodoc config init [-g] [--force]

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, is_json};
use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the effective configuration (merged from all sources)
pub fn show(ctx: &CommandContext, format: &str) -> Result<()> {
    println!("{}", ConfigLoader::render(&ctx.config, is_json(format))?);
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

pub fn init(output: &Output, global: bool, force: bool) -> Result<()> {
    let path = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(force)?
    };
    let scope = if global { "global" } else { "project" };
    output.success(&format!("Initialized {} configuration", scope));
    output.info(&format!("Config: {}", path.display()));
    Ok(())
}
