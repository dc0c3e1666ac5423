//! Unified Error Type System
//!
//! Centralized error types for the whole crate.
//!
//! ## Error Categories
//!
//! - **Validation**: Empty or malformed input (report, abort, no state change)
//! - **NotFound**: Unknown project, repository or path (report, abort)
//! - **NoContent**: Nothing generated yet (report, no-op)
//! - **Selection**: Operation needs an active project or repository
//! - **Cancelled**: A pipeline run was dropped before completion
//! - **System**: IO, serialization and configuration failures
//!
//! Every error is recovered at the boundary where it is raised and surfaced
//! to the user as a notification. There is no retry policy.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Error categories used for user-facing notification routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    NoContent,
    Selection,
    Cancelled,
    System,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::NoContent => write!(f, "NO_CONTENT"),
            Self::Selection => write!(f, "SELECTION"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::System => write!(f, "SYSTEM"),
        }
    }
}

impl ErrorCategory {
    /// Whether the failure came from user input rather than the environment.
    ///
    /// User errors are shown as warnings; the session keeps going.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation | Self::NotFound | Self::NoContent | Self::Selection
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Structured validation error with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// What validation failed
    pub kind: ValidationErrorKind,
    /// Field or component that failed validation
    pub field: Option<String>,
    /// Detailed message
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "Validation failed for '{}': {}", field, self.message)
        } else {
            write!(f, "Validation failed: {}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
        }
    }

    /// Add field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Required input was empty or whitespace only
    pub fn empty(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(
            ValidationErrorKind::MissingField,
            format!("{} is required", field),
        )
        .with_field(field)
    }
}

/// Validation error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Required field missing or blank
    MissingField,
    /// Invalid format
    Format,
    /// Structural rule of a file tree violated
    Structure,
}

// =============================================================================
// Application Error
// =============================================================================

/// Entity kinds that can be looked up and not found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Project,
    Repository,
    File,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project => write!(f, "Project"),
            Self::Repository => write!(f, "Repository"),
            Self::File => write!(f, "File"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DocError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Validation(ValidationError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: String },

    #[error("No documentation available for project '{project}'")]
    NoContent { project: String },

    #[error("No active project: select a project first")]
    NoActiveProject,

    #[error("No active repository: select a repository first")]
    NoActiveRepository,

    #[error("Pipeline cancelled before completion")]
    Cancelled,
}

impl From<ValidationError> for DocError {
    fn from(err: ValidationError) -> Self {
        DocError::Validation(err)
    }
}

pub type Result<T> = std::result::Result<T, DocError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl DocError {
    pub fn project_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: Entity::Project,
            id: id.into(),
        }
    }

    pub fn repository_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: Entity::Repository,
            id: id.into(),
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::NotFound {
            entity: Entity::File,
            id: path.into(),
        }
    }

    /// Routing category for notifications
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::NoContent { .. } => ErrorCategory::NoContent,
            Self::NoActiveProject | Self::NoActiveRepository => ErrorCategory::Selection,
            Self::Cancelled => ErrorCategory::Cancelled,
            Self::Io(_) | Self::Json(_) | Self::Config(_) => ErrorCategory::System,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Validation.to_string(), "VALIDATION");
        assert_eq!(ErrorCategory::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(ErrorCategory::NoContent.to_string(), "NO_CONTENT");
    }

    #[test]
    fn test_user_error_classification() {
        assert!(ErrorCategory::Validation.is_user_error());
        assert!(ErrorCategory::Selection.is_user_error());
        assert!(!ErrorCategory::System.is_user_error());
        assert!(!ErrorCategory::Cancelled.is_user_error());
    }

    #[test]
    fn test_empty_validation_error() {
        let err = ValidationError::empty("Project name");
        assert_eq!(err.kind, ValidationErrorKind::MissingField);
        assert_eq!(err.field.as_deref(), Some("Project name"));
        assert_eq!(
            err.to_string(),
            "Validation failed for 'Project name': Project name is required"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = DocError::project_not_found("42");
        assert_eq!(err.to_string(), "Project not found: 42");
        assert_eq!(err.category(), ErrorCategory::NotFound);

        let err = DocError::repository_not_found("r1");
        assert_eq!(err.to_string(), "Repository not found: r1");
    }

    #[test]
    fn test_category_routing() {
        let validation: DocError = ValidationError::empty("URL").into();
        assert_eq!(validation.category(), ErrorCategory::Validation);
        assert_eq!(
            DocError::NoActiveRepository.category(),
            ErrorCategory::Selection
        );
        assert_eq!(
            DocError::NoContent {
                project: "Demo".into()
            }
            .category(),
            ErrorCategory::NoContent
        );
        assert_eq!(
            DocError::Config("bad".into()).category(),
            ErrorCategory::System
        );
    }
}
