//! repodoc - Repository Documentation Workspace
//!
//! Users create projects, attach repositories, pick a file from the
//! repository tree and run a simulated documentation pipeline that resolves
//! to Markdown. The Markdown can be previewed as HTML, shown raw, or
//! downloaded.
//!
//! ## Quick Start
//!
//! ```ignore
//! use repodoc::{Config, PipelineSimulator, ProjectStore};
//! use repodoc::types::{RepoSource, RepoVisibility};
//!
//! let config = Config::default();
//! let store = ProjectStore::from_config(&config).into_shared();
//! let project = store.create_project("Demo")?;
//! let project = store.import_repository(
//!     &project.id,
//!     "https://github.com/acme/widgets",
//!     RepoVisibility::Public,
//!     RepoSource::Github,
//! )?;
//! let repo = &project.repositories[0];
//!
//! let simulator = PipelineSimulator::new(config.simulator.clone())?;
//! let report = simulator.start(repo.structure.flatten()).wait().await?;
//! let project = store
//!     .generate_documentation(&project.id, &repo.id, "src/App.tsx")
//!     .await?;
//! ```
//!
//! ## Modules
//!
//! - [`types`]: file tree, project records, errors
//! - [`session`]: project → repository → file selection
//! - [`pipeline`]: seeded, cancellable pipeline simulator
//! - [`storage`]: copy-on-write project store and tree sources
//! - [`docs`]: documentation template, Markdown rendering, download artifact
//! - [`config`]: layered configuration

pub mod cli;
pub mod config;
pub mod constants;
pub mod docs;
pub mod pipeline;
pub mod session;
pub mod storage;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, SimulatorConfig};

// Error Types
pub use types::error::{DocError, ErrorCategory, Result};

// Storage
pub use storage::{ProjectStore, SharedStore, TreeSource};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use pipeline::{PipelineEvent, PipelineSimulator, SimulationHandle, SimulationReport};

// =============================================================================
// Docs Re-exports
// =============================================================================

pub use docs::{DocumentArtifact, MarkdownView};
