//! In-memory Project Store
//!
//! Holds every project of a session. Records are never mutated in place:
//! each mutation builds a new [`Project`] and swaps the stored `Arc`, so a
//! caller holding an earlier snapshot keeps seeing it unchanged.
//!
//! The lock is only held for the swap itself. Documentation generation
//! reads the project, waits out the simulated latency, then writes; two
//! overlapping generations for one project both complete and the later
//! write wins.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, error, info, instrument};

use super::tree_source::{self, MockTreeSource, TreeSource};
use crate::config::{Config, StoreConfig};
use crate::constants::store::SAMPLE_PROJECT_NAME;
use crate::docs::{DocumentArtifact, template};
use crate::types::{
    DocError, Documentation, Project, ProjectId, RepoId, RepoSource, RepoVisibility, Repository,
    Result, ValidationError,
};

pub type SharedStore = Arc<ProjectStore>;

pub struct ProjectStore {
    projects: RwLock<Vec<Arc<Project>>>,
    config: StoreConfig,
    tree_source: Box<dyn TreeSource>,
}

impl ProjectStore {
    /// Empty store backed by the mock tree source
    pub fn new(config: StoreConfig) -> Self {
        Self {
            projects: RwLock::new(Vec::new()),
            config,
            tree_source: Box::new(MockTreeSource),
        }
    }

    /// Store set up from the full configuration: tree source chosen by
    /// `import.scan_local_paths`, sample project seeded when enabled.
    pub fn from_config(config: &Config) -> Self {
        let store = Self::new(config.store.clone())
            .with_tree_source(tree_source::from_config(&config.import));
        if config.store.seed_sample_project {
            store.with_sample_data()
        } else {
            store
        }
    }

    pub fn with_tree_source(mut self, source: Box<dyn TreeSource>) -> Self {
        self.tree_source = source;
        self
    }

    /// Adds the sample project every fresh session starts with
    pub fn with_sample_data(self) -> Self {
        self.write_projects()
            .push(Arc::new(Project::new(SAMPLE_PROJECT_NAME)));
        self
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(self)
    }

    fn read_projects(&self) -> RwLockReadGuard<'_, Vec<Arc<Project>>> {
        self.projects.read().unwrap_or_else(|poisoned| {
            error!("Project store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_projects(&self) -> RwLockWriteGuard<'_, Vec<Arc<Project>>> {
        self.projects.write().unwrap_or_else(|poisoned| {
            error!("Project store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Replace the project with `id` by `update(current)`
    fn update<F>(&self, id: &ProjectId, update: F) -> Result<Arc<Project>>
    where
        F: FnOnce(&Project) -> Project,
    {
        let mut projects = self.write_projects();
        let slot = projects
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| DocError::project_not_found(id.as_str()))?;
        let updated = Arc::new(update(&**slot));
        *slot = Arc::clone(&updated);
        Ok(updated)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Snapshot of every project, in creation order
    pub fn projects(&self) -> Vec<Arc<Project>> {
        self.read_projects().clone()
    }

    pub fn project(&self, id: &ProjectId) -> Result<Arc<Project>> {
        self.read_projects()
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| DocError::project_not_found(id.as_str()))
    }

    pub fn repository(&self, project_id: &ProjectId, repo_id: &RepoId) -> Result<Repository> {
        let project = self.project(project_id)?;
        project
            .repository(repo_id)
            .cloned()
            .ok_or_else(|| DocError::repository_not_found(repo_id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.read_projects().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_projects().is_empty()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn create_project(&self, name: &str) -> Result<Arc<Project>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty("name").into());
        }

        let project = Arc::new(Project::new(name));
        self.write_projects().push(Arc::clone(&project));

        info!(id = %project.id, name, "Project created");
        Ok(project)
    }

    /// Attach a repository to a project. The file tree comes from the
    /// configured [`TreeSource`].
    pub fn import_repository(
        &self,
        project_id: &ProjectId,
        url: &str,
        visibility: RepoVisibility,
        source: RepoSource,
    ) -> Result<Arc<Project>> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ValidationError::empty("url").into());
        }
        // Fail before touching the tree source
        self.project(project_id)?;

        let structure = self.tree_source.fetch(url, source)?;
        structure.validate()?;

        let repository = Repository::new(url, visibility, source, structure);
        let (repo_id, repo_name) = (repository.id.clone(), repository.name.clone());

        let updated = self.update(project_id, |p| p.clone().with_repository(repository))?;

        info!(
            project = %project_id,
            repo = %repo_id,
            name = %repo_name,
            files = updated.repositories.last().map_or(0, |r| r.structure.file_count()),
            "Repository imported"
        );
        Ok(updated)
    }

    /// Generate documentation after the configured latency. Generation does
    /// not look at the file: the stored content is always the fixed template.
    #[instrument(skip(self, project_id, repo_id), fields(project = %project_id, repo = %repo_id))]
    pub async fn generate_documentation(
        &self,
        project_id: &ProjectId,
        repo_id: &RepoId,
        file_path: &str,
    ) -> Result<Arc<Project>> {
        self.project(project_id)?;

        let latency = self.config.generation_latency();
        debug!(latency_ms = latency.as_millis() as u64, "Generating documentation");
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let content = template::generate(file_path);
        let documentation = Documentation::generated(content, repo_id.clone());
        let updated = self.update(project_id, |p| p.clone().with_documentation(documentation))?;

        info!(file = file_path, "Documentation generated");
        Ok(updated)
    }

    pub fn download_documentation(&self, project_id: &ProjectId) -> Result<DocumentArtifact> {
        let project = self.project(project_id)?;
        DocumentArtifact::for_project(&project).ok_or_else(|| DocError::NoContent {
            project: project.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalDirTreeSource;
    use crate::types::{Entity, FileTree};
    use std::time::Duration;
    use tokio::time::Instant;

    fn store() -> ProjectStore {
        ProjectStore::new(StoreConfig::default())
    }

    fn with_repo(store: &ProjectStore) -> (ProjectId, RepoId) {
        let project = store.create_project("Demo").unwrap();
        let project = store
            .import_repository(
                &project.id,
                "https://github.com/a/b",
                RepoVisibility::Public,
                RepoSource::Github,
            )
            .unwrap();
        (project.id.clone(), project.repositories[0].id.clone())
    }

    #[test]
    fn test_create_project_rejects_blank_names() {
        let store = store();
        for name in ["", "   "] {
            let err = store.create_project(name).unwrap_err();
            assert!(matches!(err, DocError::Validation(_)));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_project_trims_and_appends() {
        let store = store().with_sample_data();
        let project = store.create_project("  Demo ").unwrap();

        assert_eq!(project.name, "Demo");
        assert!(project.repositories.is_empty());
        assert!(project.documentation.is_none());

        let names: Vec<String> = store.projects().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Sample Project", "Demo"]);
    }

    #[test]
    fn test_import_unknown_project() {
        let err = store()
            .import_repository(
                &ProjectId::new("missing"),
                "https://github.com/a/b",
                RepoVisibility::Public,
                RepoSource::Github,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            DocError::NotFound {
                entity: Entity::Project,
                ..
            }
        ));
    }

    #[test]
    fn test_import_rejects_blank_url() {
        let store = store();
        let project = store.create_project("Demo").unwrap();
        let err = store
            .import_repository(&project.id, "  ", RepoVisibility::Public, RepoSource::Github)
            .unwrap_err();
        assert!(matches!(err, DocError::Validation(_)));
    }

    #[test]
    fn test_import_attaches_named_repository() {
        let store = store();
        let (project_id, repo_id) = with_repo(&store);

        let project = store.project(&project_id).unwrap();
        assert_eq!(project.repositories.len(), 1);

        let repo = store.repository(&project_id, &repo_id).unwrap();
        assert_eq!(repo.name, "b");
        assert_eq!(repo.structure, FileTree::sample());

        let local = store
            .import_repository(&project_id, "/tmp/x", RepoVisibility::Local, RepoSource::Local)
            .unwrap();
        assert_eq!(local.repositories.len(), 2);
        assert_eq!(local.repositories[1].name, "Local Repository");
    }

    #[test]
    fn test_snapshots_survive_mutation() {
        let store = store();
        let before = store.create_project("Demo").unwrap();

        let after = store
            .import_repository(
                &before.id,
                "https://bitbucket.org/a/c.git",
                RepoVisibility::Private,
                RepoSource::Bitbucket,
            )
            .unwrap();

        assert!(before.repositories.is_empty());
        assert_eq!(after.repositories[0].name, "c");
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(&after, &store.project(&before.id).unwrap()));
    }

    #[test]
    fn test_unknown_repository() {
        let store = store();
        let (project_id, _) = with_repo(&store);
        let err = store
            .repository(&project_id, &RepoId::new("nope"))
            .unwrap_err();
        assert!(matches!(
            err,
            DocError::NotFound {
                entity: Entity::Repository,
                ..
            }
        ));
    }

    #[test]
    fn test_download_before_generation() {
        let store = store();
        let (project_id, _) = with_repo(&store);
        let err = store.download_documentation(&project_id).unwrap_err();
        assert!(matches!(err, DocError::NoContent { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_waits_then_stores_template() {
        let store = store();
        let (project_id, repo_id) = with_repo(&store);

        let begin = Instant::now();
        let project = store
            .generate_documentation(&project_id, &repo_id, "src/App.tsx")
            .await
            .unwrap();
        assert!(begin.elapsed() >= Duration::from_millis(1000));

        let docs = project.documentation.as_ref().unwrap();
        assert!(docs.generated);
        assert_eq!(docs.source_repo.as_ref(), Some(&repo_id));
        assert_eq!(docs.content.as_deref(), Some(crate::docs::DOCUMENTATION_TEMPLATE));

        let artifact = store.download_documentation(&project_id).unwrap();
        assert_eq!(artifact.filename, "Demo-documentation.md");
        assert_eq!(artifact.content_type, "text/markdown");
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_unknown_project() {
        let err = store()
            .generate_documentation(&ProjectId::new("x"), &RepoId::new("y"), "a")
            .await
            .unwrap_err();
        assert!(matches!(err, DocError::NotFound { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_generations_last_write_wins() {
        let store = store().into_shared();
        let (project_id, first_repo) = with_repo(&store);
        let second = store
            .import_repository(&project_id, "https://github.com/a/z", RepoVisibility::Public, RepoSource::Github)
            .unwrap();
        let second_repo = second.repositories[1].id.clone();

        let a = {
            let store = Arc::clone(&store);
            let (p, r) = (project_id.clone(), first_repo.clone());
            tokio::spawn(async move { store.generate_documentation(&p, &r, "a").await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let b = {
            let store = Arc::clone(&store);
            let (p, r) = (project_id.clone(), second_repo.clone());
            tokio::spawn(async move { store.generate_documentation(&p, &r, "b").await })
        };

        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let project = store.project(&project_id).unwrap();
        let docs = project.documentation.as_ref().unwrap();
        assert_eq!(docs.source_repo.as_ref(), Some(&second_repo));
        assert_eq!(project.repositories.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_keeps_concurrent_imports() {
        let store = store().into_shared();
        let (project_id, repo_id) = with_repo(&store);

        let task = {
            let store = Arc::clone(&store);
            let (p, r) = (project_id.clone(), repo_id.clone());
            tokio::spawn(async move { store.generate_documentation(&p, &r, "a").await })
        };
        tokio::task::yield_now().await;
        store
            .import_repository(&project_id, "https://github.com/a/late", RepoVisibility::Public, RepoSource::Github)
            .unwrap();

        let project = task.await.unwrap().unwrap();
        assert_eq!(project.repositories.len(), 2);
        assert!(project.documentation.is_some());
    }

    #[test]
    fn test_import_with_local_tree_source() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/lib.rs"), "").unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "").unwrap();

        let store = store().with_tree_source(Box::new(LocalDirTreeSource::new()));
        let project = store.create_project("Local").unwrap();
        let project = store
            .import_repository(
                &project.id,
                &dir.path().display().to_string(),
                RepoVisibility::Local,
                RepoSource::Local,
            )
            .unwrap();

        let repository = &project.repositories[0];
        assert_eq!(repository.name, "Local Repository");
        assert_eq!(repository.structure.flatten(), vec!["Cargo.toml", "src/lib.rs"]);
    }

    #[test]
    fn test_from_config_seeds_sample() {
        let store = ProjectStore::from_config(&Config::default());
        assert_eq!(store.len(), 1);
        assert_eq!(store.projects()[0].name, "Sample Project");

        let mut config = Config::default();
        config.store.seed_sample_project = false;
        assert!(ProjectStore::from_config(&config).is_empty());
    }
}
