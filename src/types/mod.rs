pub mod error;
pub mod project;
pub mod tree;

pub use error::{
    DocError, Entity, ErrorCategory, Result, ValidationError, ValidationErrorKind,
};
pub use project::{
    Documentation, LOCAL_REPOSITORY_NAME, Project, ProjectId, RepoId, RepoSource, RepoVisibility,
    Repository, display_name,
};
pub use tree::{FileNode, FileTree, NodeKind, find, flatten};
