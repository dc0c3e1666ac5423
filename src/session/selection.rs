//! Selection State
//!
//! Tracks the active project, repository and file path for one UI session.
//!
//! ```text
//! NoProject → ProjectSelected → RepoSelected → FileSelected
//! ```
//!
//! Setting a shallower slot always resets the deeper ones. A failed
//! transition leaves the state untouched.

use tracing::debug;

use crate::types::{DocError, ProjectId, RepoId, Repository, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStage {
    NoProject,
    ProjectSelected,
    RepoSelected,
    FileSelected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    project_id: Option<ProjectId>,
    repo_id: Option<RepoId>,
    file_path: Option<String>,
}

/// Everything needed to start a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSelection {
    pub project_id: ProjectId,
    pub repo_id: RepoId,
    pub file_path: String,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> SelectionStage {
        match (&self.project_id, &self.repo_id, &self.file_path) {
            (None, _, _) => SelectionStage::NoProject,
            (Some(_), None, _) => SelectionStage::ProjectSelected,
            (Some(_), Some(_), None) => SelectionStage::RepoSelected,
            (Some(_), Some(_), Some(_)) => SelectionStage::FileSelected,
        }
    }

    pub fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    pub fn repo_id(&self) -> Option<&RepoId> {
        self.repo_id.as_ref()
    }

    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    pub fn select_project(&mut self, id: ProjectId) {
        debug!(project = %id, "Project selected");
        self.project_id = Some(id);
        self.repo_id = None;
        self.file_path = None;
    }

    /// Moves to `RepoSelected` and clears the file selection
    pub fn select_repo(&mut self, id: RepoId) -> Result<()> {
        if self.project_id.is_none() {
            return Err(DocError::NoActiveProject);
        }
        debug!(repo = %id, "Repository selected");
        self.repo_id = Some(id);
        self.file_path = None;
        Ok(())
    }

    /// Selects `path` inside the active repository.
    ///
    /// `repository` must be the selected one and `path` must name a file node
    /// in its tree.
    pub fn select_file(&mut self, repository: &Repository, path: &str) -> Result<()> {
        match &self.repo_id {
            Some(active) if *active == repository.id => {}
            _ => return Err(DocError::NoActiveRepository),
        }

        if repository.structure.find_file(path).is_none() {
            return Err(DocError::file_not_found(path));
        }

        debug!(path, "File selected");
        self.file_path = Some(path.to_string());
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The full selection, or the first missing slot as an error
    pub fn ensure_ready(&self) -> Result<ActiveSelection> {
        let project_id = self.project_id.clone().ok_or(DocError::NoActiveProject)?;
        let repo_id = self.repo_id.clone().ok_or(DocError::NoActiveRepository)?;
        let file_path = self
            .file_path
            .clone()
            .ok_or_else(|| DocError::file_not_found("<no file selected>"))?;
        Ok(ActiveSelection {
            project_id,
            repo_id,
            file_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileTree, RepoSource, RepoVisibility};

    fn repo() -> Repository {
        Repository::new(
            "https://github.com/a/b",
            RepoVisibility::Public,
            RepoSource::Github,
            FileTree::sample(),
        )
    }

    #[test]
    fn test_initial_stage() {
        let state = SelectionState::new();
        assert_eq!(state.stage(), SelectionStage::NoProject);
        assert!(state.ensure_ready().is_err());
    }

    #[test]
    fn test_full_progression() {
        let repo = repo();
        let mut state = SelectionState::new();

        state.select_project(ProjectId::new("p1"));
        assert_eq!(state.stage(), SelectionStage::ProjectSelected);

        state.select_repo(repo.id.clone()).unwrap();
        assert_eq!(state.stage(), SelectionStage::RepoSelected);

        state.select_file(&repo, "src/App.tsx").unwrap();
        assert_eq!(state.stage(), SelectionStage::FileSelected);

        let active = state.ensure_ready().unwrap();
        assert_eq!(active.project_id.as_str(), "p1");
        assert_eq!(active.repo_id, repo.id);
        assert_eq!(active.file_path, "src/App.tsx");
    }

    #[test]
    fn test_select_repo_clears_file() {
        let repo = repo();
        let mut state = SelectionState::new();
        state.select_project(ProjectId::new("p1"));
        state.select_repo(repo.id.clone()).unwrap();
        state.select_file(&repo, "README.md").unwrap();

        state.select_repo(RepoId::new("other")).unwrap();
        assert_eq!(state.stage(), SelectionStage::RepoSelected);
        assert!(state.file_path().is_none());

        // Reselecting the same repository also clears the file
        state.select_repo(repo.id.clone()).unwrap();
        assert!(state.file_path().is_none());
    }

    #[test]
    fn test_select_project_clears_deeper_slots() {
        let repo = repo();
        let mut state = SelectionState::new();
        state.select_project(ProjectId::new("p1"));
        state.select_repo(repo.id.clone()).unwrap();
        state.select_file(&repo, "README.md").unwrap();

        state.select_project(ProjectId::new("p2"));
        assert_eq!(state.stage(), SelectionStage::ProjectSelected);
        assert!(state.repo_id().is_none());
        assert!(state.file_path().is_none());
    }

    #[test]
    fn test_select_file_without_repo_fails_unchanged() {
        let repo = repo();
        let mut state = SelectionState::new();
        state.select_project(ProjectId::new("p1"));
        let before = state.clone();

        let err = state.select_file(&repo, "README.md").unwrap_err();
        assert!(matches!(err, DocError::NoActiveRepository));
        assert_eq!(state, before);
    }

    #[test]
    fn test_select_file_in_other_repo_fails() {
        let active = repo();
        let other = repo();
        let mut state = SelectionState::new();
        state.select_project(ProjectId::new("p1"));
        state.select_repo(active.id.clone()).unwrap();

        let err = state.select_file(&other, "README.md").unwrap_err();
        assert!(matches!(err, DocError::NoActiveRepository));
    }

    #[test]
    fn test_select_missing_or_folder_path_fails_unchanged() {
        let repo = repo();
        let mut state = SelectionState::new();
        state.select_project(ProjectId::new("p1"));
        state.select_repo(repo.id.clone()).unwrap();
        state.select_file(&repo, "README.md").unwrap();
        let before = state.clone();

        assert!(matches!(
            state.select_file(&repo, "nope.rs"),
            Err(DocError::NotFound { .. })
        ));
        assert!(state.select_file(&repo, "src/pages").is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_select_repo_requires_project() {
        let mut state = SelectionState::new();
        let err = state.select_repo(RepoId::new("r1")).unwrap_err();
        assert!(matches!(err, DocError::NoActiveProject));
        assert_eq!(state.stage(), SelectionStage::NoProject);
    }

    #[test]
    fn test_clear() {
        let mut state = SelectionState::new();
        state.select_project(ProjectId::new("p1"));
        state.clear();
        assert_eq!(state.stage(), SelectionStage::NoProject);
    }
}
