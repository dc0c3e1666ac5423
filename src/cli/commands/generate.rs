//! Generate Command
//!
//! Runs a whole documentation session in one go:
//!
//! ```text
//! create project → import repository → select repo and file
//!     → pipeline run (progress on stderr) → generate → render → download
//! ```
//!
//! Ctrl-C during the pipeline run cancels it; nothing is generated.

use std::io;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::cli::progress::{ConsoleRenderer, format_duration};
use crate::cli::util::CommandContext;
use crate::constants::docs::EXCERPT_CHARS;
use crate::docs::{MarkdownView, excerpt, render};
use crate::pipeline::{PipelineSimulator, SimulationHandle, SimulationReport};
use crate::session::SelectionState;
use crate::storage::ProjectStore;
use crate::types::{DocError, RepoSource, RepoVisibility, Result};

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub project: String,
    pub url: String,
    pub visibility: RepoVisibility,
    pub source: RepoSource,
    /// File to document; the first file of the tree when unset
    pub file: Option<String>,
    /// Download directory; `output.dir` when unset
    pub output: Option<PathBuf>,
    /// Documentation view; `output.view` when unset
    pub view: Option<MarkdownView>,
    /// Fixed pipeline seed
    pub seed: Option<u64>,
    pub download: bool,
    /// Print only a short excerpt of the documentation
    pub excerpt: bool,
}

/// What a finished session produced
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub report: SimulationReport,
    pub content: String,
    pub download: Option<PathBuf>,
}

pub async fn run(ctx: &CommandContext, options: GenerateOptions) -> Result<()> {
    let outcome = execute(ctx, &options).await?;

    let view = options.view.unwrap_or(ctx.config.output.view);
    let content = if options.excerpt {
        excerpt(&outcome.content, EXCERPT_CHARS)
    } else {
        outcome.content.clone()
    };
    ctx.output.section("Documentation");
    println!("{}", render(&content, view));

    if let Some(path) = &outcome.download {
        ctx.output.success(&format!("Documentation downloaded: {}", path.display()));
    }
    Ok(())
}

/// Run the session without printing the documentation
pub async fn execute(ctx: &CommandContext, options: &GenerateOptions) -> Result<GenerateOutcome> {
    let output = &ctx.output;
    let store = ProjectStore::from_config(&ctx.config).into_shared();
    let mut selection = SelectionState::new();

    let project = store.create_project(&options.project)?;
    output.success(&format!("Project created: {}", project.name));
    selection.select_project(project.id.clone());

    let project = store.import_repository(&project.id, &options.url, options.visibility, options.source)?;
    let repository = project
        .repositories
        .last()
        .cloned()
        .ok_or_else(|| DocError::repository_not_found(&options.url))?;
    output.success(&format!(
        "Repository imported: {} ({} files)",
        repository.name,
        repository.structure.file_count()
    ));
    selection.select_repo(repository.id.clone())?;

    let files = repository.structure.flatten();
    let file = match &options.file {
        Some(file) => file.clone(),
        None => files
            .first()
            .cloned()
            .ok_or_else(|| DocError::file_not_found(format!("{}/*", repository.name)))?,
    };
    selection.select_file(&repository, &file)?;
    let active = selection.ensure_ready()?;
    debug!(project = %active.project_id, repo = %active.repo_id, file = %active.file_path, "Selection ready");

    let mut simulator_config = ctx.config.simulator.clone();
    if options.seed.is_some() {
        simulator_config.seed = options.seed;
    }
    let simulator = PipelineSimulator::new(simulator_config)?;

    output.info(&format!("Analyzing {} files...", files.len()));
    let mut handle = simulator.start(files);
    let mut renderer = ConsoleRenderer::new().enabled(!output.is_quiet());

    follow(&mut handle, &mut renderer, tokio::signal::ctrl_c()).await;
    renderer.finish();

    let report = handle.wait().await?;
    info!(
        seed = report.seed,
        elapsed = %format_duration(renderer.state().elapsed_secs()),
        "Pipeline finished"
    );

    let project = store
        .generate_documentation(&active.project_id, &active.repo_id, &active.file_path)
        .await?;
    output.success("Documentation generated successfully");

    let content = project
        .documentation_content()
        .map(str::to_string)
        .ok_or_else(|| DocError::NoContent {
            project: project.name.clone(),
        })?;

    let download = if options.download {
        let dir = options
            .output
            .clone()
            .unwrap_or_else(|| ctx.config.output.dir.clone());
        let artifact = store.download_documentation(&active.project_id)?;
        Some(artifact.write_to(&dir)?)
    } else {
        None
    };

    Ok(GenerateOutcome {
        report,
        content,
        download,
    })
}

/// Render events until the run resolves or `interrupt` fires. An interrupt
/// that fails (no signal handler) leaves the run alone.
async fn follow<F>(handle: &mut SimulationHandle, renderer: &mut ConsoleRenderer, interrupt: F)
where
    F: Future<Output = io::Result<()>>,
{
    tokio::pin!(interrupt);
    let mut listening = true;
    loop {
        tokio::select! {
            event = handle.next_event() => match event {
                Some(event) => renderer.on_event(&event),
                None => break,
            },
            result = &mut interrupt, if listening => match result {
                Ok(()) => {
                    handle.cancel();
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "Interrupt handler unavailable, run can't be cancelled");
                    listening = false;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, SimulatorConfig};
    use crate::docs::DOCUMENTATION_TEMPLATE;
    use tempfile::TempDir;

    fn options(dir: &TempDir) -> GenerateOptions {
        GenerateOptions {
            project: "Demo".to_string(),
            url: "https://github.com/a/b".to_string(),
            visibility: RepoVisibility::Public,
            source: RepoSource::Github,
            file: None,
            output: Some(dir.path().to_path_buf()),
            view: None,
            seed: Some(7),
            download: true,
            excerpt: false,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_generates_and_downloads() {
        let dir = TempDir::new().unwrap();
        let ctx = CommandContext::with_config(Config::default(), true);

        let outcome = execute(&ctx, &options(&dir)).await.unwrap();

        assert_eq!(outcome.report.seed, 7);
        assert_eq!(outcome.report.files, 10);
        assert_eq!(outcome.report.final_progress, 100.0);
        assert_eq!(outcome.content, DOCUMENTATION_TEMPLATE);

        let path = outcome.download.unwrap();
        assert_eq!(path, dir.path().join("Demo-documentation.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), DOCUMENTATION_TEMPLATE);
    }

    fn simulator() -> PipelineSimulator {
        PipelineSimulator::new(SimulatorConfig {
            seed: Some(3),
            ..SimulatorConfig::default()
        })
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_cancels_run() {
        let mut handle = simulator().start(vec!["a.rs".to_string(), "b.rs".to_string()]);
        let mut renderer = ConsoleRenderer::new().enabled(false);

        follow(&mut handle, &mut renderer, std::future::ready(Ok(()))).await;

        assert!(matches!(handle.wait().await, Err(DocError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_interrupt_handler_keeps_running() {
        let mut handle = simulator().start(vec!["a.rs".to_string(), "b.rs".to_string()]);
        let mut renderer = ConsoleRenderer::new().enabled(false);
        let unavailable = std::future::ready(Err(io::Error::other("no signal handler")));

        follow(&mut handle, &mut renderer, unavailable).await;

        assert_eq!(renderer.state().progress, 100.0);
        let report = handle.wait().await.unwrap();
        assert_eq!(report.final_progress, 100.0);
        assert_eq!(report.events, 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let ctx = CommandContext::with_config(Config::default(), true);
        let mut options = options(&dir);
        options.file = Some("src".to_string());

        let err = execute(&ctx, &options).await.unwrap_err();
        assert!(matches!(err, DocError::NotFound { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_project_name_fails_first() {
        let dir = TempDir::new().unwrap();
        let ctx = CommandContext::with_config(Config::default(), true);
        let mut options = options(&dir);
        options.project = "  ".to_string();
        options.download = false;

        let err = execute(&ctx, &options).await.unwrap_err();
        assert!(matches!(err, DocError::Validation(_)));
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
