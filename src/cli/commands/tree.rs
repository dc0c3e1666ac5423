//! Tree Command
//!
//! Print the file tree an import would attach.
//!
//! Usage:
//!   repodoc tree [--url URL] [--source github|bitbucket|local] [-f json]

use crate::cli::util::{CommandContext, is_json};
use crate::storage::tree_source;
use crate::types::{FileTree, RepoSource, Result, display_name};

/// Repository location used when none is given
fn default_url(source: RepoSource) -> &'static str {
    match source {
        RepoSource::Local => ".",
        _ => "https://github.com/example/repository",
    }
}

pub fn fetch(ctx: &CommandContext, url: Option<&str>, source: RepoSource) -> Result<FileTree> {
    let url = url.unwrap_or(default_url(source));
    let tree = tree_source::from_config(&ctx.config.import).fetch(url, source)?;
    tree.validate()?;
    Ok(tree)
}

pub fn run(ctx: &CommandContext, url: Option<&str>, source: RepoSource, format: &str) -> Result<()> {
    let tree = fetch(ctx, url, source)?;

    if is_json(format) {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    let name = display_name(url.unwrap_or(default_url(source)), source);
    ctx.output.header(&format!(
        "{} ({} files, {} folders)",
        name,
        tree.file_count(),
        tree.folder_count()
    ));
    print!("{}", tree.render_outline());
    Ok(())
}
