//! Render Command
//!
//! Usage:
//!   repodoc render <FILE> [--view preview|raw]

use std::fs;
use std::path::Path;

use crate::docs::{MarkdownView, render};
use crate::types::Result;

pub fn run(path: &Path, view: MarkdownView) -> Result<()> {
    let content = fs::read_to_string(path)?;
    println!("{}", render(&content, view));
    Ok(())
}
