//! Downloadable documentation artifact

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::constants::docs::CONTENT_TYPE;
use crate::types::{Project, Result};

/// Generated documentation packaged for download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentArtifact {
    /// `<project-name>-documentation.md`
    pub filename: String,
    pub content: String,
    pub content_type: &'static str,
}

impl DocumentArtifact {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            content_type: CONTENT_TYPE,
        }
    }

    /// Artifact for `project`, or `None` when nothing has been generated
    pub fn for_project(project: &Project) -> Option<Self> {
        project
            .documentation_content()
            .map(|content| Self::new(project.documentation_filename(), content))
    }

    /// File name safe to create inside a directory. Project names are free
    /// text, so path separators and control characters are replaced.
    pub fn file_name(&self) -> String {
        let name: String = self
            .filename
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        let name = name.trim_start_matches('.');
        if name.is_empty() {
            "documentation.md".to_string()
        } else {
            name.to_string()
        }
    }

    /// Write the artifact into `dir`, creating it if needed. Returns the
    /// written path. An existing file of the same name is overwritten.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, &self.content)?;
        info!(path = %path.display(), bytes = self.content.len(), "Documentation written");
        Ok(path)
    }
}
