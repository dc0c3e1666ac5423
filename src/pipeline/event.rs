//! Pipeline progress events

use serde::Serialize;

/// Progress event emitted by a simulation run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// Run accepted, first file not yet started
    Started { message: &'static str, total: usize },
    /// A file entered processing
    FileStarted {
        index: usize,
        total: usize,
        file: String,
        message: &'static str,
        progress: f64,
    },
    /// A file finished processing
    FileProcessed {
        index: usize,
        total: usize,
        progress: f64,
    },
    /// Every file processed
    Completed { message: &'static str, progress: f64 },
}

impl PipelineEvent {
    /// Overall progress in percent (0-100)
    pub fn progress(&self) -> f64 {
        match self {
            Self::Started { .. } => 0.0,
            Self::FileStarted { progress, .. }
            | Self::FileProcessed { progress, .. }
            | Self::Completed { progress, .. } => *progress,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Started { message, .. }
            | Self::FileStarted { message, .. }
            | Self::Completed { message, .. } => Some(message),
            Self::FileProcessed { .. } => None,
        }
    }

    pub fn current_file(&self) -> Option<&str> {
        match self {
            Self::FileStarted { file, .. } => Some(file),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}
