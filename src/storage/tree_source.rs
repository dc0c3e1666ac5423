//! Repository tree sources
//!
//! The store never fetches anything itself. Whatever provides the file tree
//! of an imported repository sits behind [`TreeSource`]: the mock structure
//! by default, or a walk of a local directory.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::config::ImportConfig;
use crate::constants::scan::{MAX_FILES, SKIP_DIRS};
use crate::types::{
    FileNode, FileTree, RepoSource, Result, ValidationError, ValidationErrorKind,
};

pub trait TreeSource: Send + Sync {
    /// File tree of the repository at `url`
    fn fetch(&self, url: &str, source: RepoSource) -> Result<FileTree>;
}

/// Tree source selected by the import settings
pub fn from_config(config: &ImportConfig) -> Box<dyn TreeSource> {
    if config.scan_local_paths {
        Box::new(LocalDirTreeSource::new().with_exclude(config.exclude.clone()))
    } else {
        Box::new(MockTreeSource)
    }
}

/// Returns [`FileTree::sample`] for every repository
#[derive(Debug, Clone, Copy, Default)]
pub struct MockTreeSource;

impl TreeSource for MockTreeSource {
    fn fetch(&self, _url: &str, _source: RepoSource) -> Result<FileTree> {
        Ok(FileTree::sample())
    }
}

/// Builds trees for local repositories by walking the directory the URL
/// points at. Remote sources fall back to the mock structure.
#[derive(Debug, Clone)]
pub struct LocalDirTreeSource {
    exclude: Vec<String>,
    max_files: usize,
}

impl Default for LocalDirTreeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalDirTreeSource {
    pub fn new() -> Self {
        Self {
            exclude: Vec::new(),
            max_files: MAX_FILES,
        }
    }

    /// Glob patterns, relative to the repository root, to leave out
    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    pub fn scan(&self, root: &Path) -> Result<FileTree> {
        if !root.is_dir() {
            return Err(ValidationError::new(
                ValidationErrorKind::Format,
                format!("not a directory: {}", root.display()),
            )
            .with_field("url")
            .into());
        }

        let patterns: Vec<glob::Pattern> = self
            .exclude
            .iter()
            .filter_map(|p| match glob::Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!(pattern = %p, error = %e, "Ignoring invalid exclude pattern");
                    None
                }
            })
            .collect();

        let walker = WalkBuilder::new(root)
            .hidden(false)
            .git_ignore(true)
            .git_exclude(true)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| SKIP_DIRS.contains(&name)))
            })
            .build();

        let mut files: Vec<Vec<String>> = Vec::new();
        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let relative_str = relative.to_string_lossy();
            if patterns.iter().any(|p| p.matches(&relative_str)) {
                continue;
            }

            files.push(
                relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect(),
            );

            if files.len() >= self.max_files {
                warn!(root = %root.display(), limit = self.max_files, "File limit reached, tree truncated");
                break;
            }
        }

        files.sort();
        debug!(root = %root.display(), files = files.len(), "Scanned local repository");
        Ok(FileTree::new(build_level(&files)))
    }
}

impl TreeSource for LocalDirTreeSource {
    fn fetch(&self, url: &str, source: RepoSource) -> Result<FileTree> {
        match source {
            RepoSource::Local => self.scan(&local_path(url)),
            _ => MockTreeSource.fetch(url, source),
        }
    }
}

/// Filesystem path of a local repository URL (`file://` or a plain path)
fn local_path(url: &str) -> PathBuf {
    let url = url.trim();
    url::Url::parse(url)
        .ok()
        .filter(|u| u.scheme() == "file")
        .and_then(|u| u.to_file_path().ok())
        .unwrap_or_else(|| PathBuf::from(url))
}

/// Builds sibling nodes from sorted component lists. Entries sharing a first
/// component are adjacent after sorting and become one folder.
fn build_level(entries: &[Vec<String>]) -> Vec<FileNode> {
    let mut nodes = Vec::new();
    let mut i = 0;
    while i < entries.len() {
        let head = &entries[i][0];
        let end = entries[i..]
            .iter()
            .position(|e| &e[0] != head)
            .map_or(entries.len(), |offset| i + offset);
        let group = &entries[i..end];

        if group.len() == 1 && group[0].len() == 1 {
            nodes.push(FileNode::file(head.clone()));
        } else {
            let children: Vec<Vec<String>> = group
                .iter()
                .filter(|e| e.len() > 1)
                .map(|e| e[1..].to_vec())
                .collect();
            nodes.push(FileNode::folder(head.clone(), build_level(&children)));
        }
        i = end;
    }
    nodes
}
