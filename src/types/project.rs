//! Project and repository records
//!
//! Value types. Updates go through the `with_*` methods, which consume a copy
//! and return a new record, so anyone still holding the previous value keeps a
//! consistent snapshot.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::FileTree;

// =============================================================================
// Identifiers
// =============================================================================

/// Type-safe wrapper for project IDs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Type-safe wrapper for repository IDs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoId(String);

impl RepoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RepoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// =============================================================================
// Repository
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepoVisibility {
    #[default]
    Public,
    Private,
    Local,
}

impl fmt::Display for RepoVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoVisibility::Public => write!(f, "public"),
            RepoVisibility::Private => write!(f, "private"),
            RepoVisibility::Local => write!(f, "local"),
        }
    }
}

impl std::str::FromStr for RepoVisibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(RepoVisibility::Public),
            "private" => Ok(RepoVisibility::Private),
            "local" => Ok(RepoVisibility::Local),
            _ => Err(format!(
                "Unknown repository type: {}. Valid values: public, private, local",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepoSource {
    #[default]
    Github,
    Bitbucket,
    Local,
}

impl fmt::Display for RepoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoSource::Github => write!(f, "github"),
            RepoSource::Bitbucket => write!(f, "bitbucket"),
            RepoSource::Local => write!(f, "local"),
        }
    }
}

impl std::str::FromStr for RepoSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" => Ok(RepoSource::Github),
            "bitbucket" => Ok(RepoSource::Bitbucket),
            "local" => Ok(RepoSource::Local),
            _ => Err(format!(
                "Unknown repository source: {}. Valid values: github, bitbucket, local",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    pub id: RepoId,
    pub url: String,
    #[serde(rename = "type")]
    pub visibility: RepoVisibility,
    pub source: RepoSource,
    pub name: String,
    pub structure: FileTree,
}

/// Display name used for repositories imported from the local filesystem
pub const LOCAL_REPOSITORY_NAME: &str = "Local Repository";

impl Repository {
    pub fn new(
        url: impl Into<String>,
        visibility: RepoVisibility,
        source: RepoSource,
        structure: FileTree,
    ) -> Self {
        let url = url.into();
        let name = display_name(&url, source);
        Self {
            id: RepoId::generate(),
            url,
            visibility,
            source,
            name,
            structure,
        }
    }
}

/// Repository display name: the last non-empty path segment of the URL with a
/// trailing `.git` removed, or [`LOCAL_REPOSITORY_NAME`] for local sources.
pub fn display_name(url: &str, source: RepoSource) -> String {
    if source == RepoSource::Local {
        return LOCAL_REPOSITORY_NAME.to_string();
    }

    let trimmed = url.trim();
    let segment = match url::Url::parse(trimmed) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .map(str::to_string),
        Err(_) => trimmed
            .split('/')
            .rfind(|s| !s.is_empty())
            .map(str::to_string),
    };

    match segment {
        Some(segment) => segment
            .strip_suffix(".git")
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or(segment),
        None => trimmed.to_string(),
    }
}

// =============================================================================
// Project
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Documentation {
    pub generated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_repo: Option<RepoId>,
}

impl Documentation {
    pub fn generated(content: impl Into<String>, source_repo: RepoId) -> Self {
        Self {
            generated: true,
            content: Some(content.into()),
            source_repo: Some(source_repo),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub repositories: Vec<Repository>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<Documentation>,
}

impl Project {
    /// Creates a project with a fresh id and no repositories. The name is
    /// stored as given; callers validate and trim it.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::generate(),
            name: name.into(),
            created_at: Utc::now(),
            repositories: Vec::new(),
            documentation: None,
        }
    }

    /// Returns a copy with `repository` appended
    pub fn with_repository(mut self, repository: Repository) -> Self {
        self.repositories.push(repository);
        self
    }

    /// Returns a copy with the documentation replaced
    pub fn with_documentation(mut self, documentation: Documentation) -> Self {
        self.documentation = Some(documentation);
        self
    }

    pub fn repository(&self, id: &RepoId) -> Option<&Repository> {
        self.repositories.iter().find(|r| &r.id == id)
    }

    /// Generated content, if any
    pub fn documentation_content(&self) -> Option<&str> {
        self.documentation
            .as_ref()
            .and_then(|d| d.content.as_deref())
    }

    /// Download file name for this project's documentation
    pub fn documentation_filename(&self) -> String {
        format!("{}-documentation.md", self.name)
    }
}
