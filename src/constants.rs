//! Global Constants
//!
//! Centralized defaults for configuration and tuning.

/// Pipeline simulator timing, in time units
pub mod simulator {
    /// Pause before the first file is processed
    pub const START_DELAY: u64 = 500;

    /// Delay between a file's start event and its completion event: [min, max)
    pub const READ_DELAY_MIN: u64 = 500;
    pub const READ_DELAY_MAX: u64 = 1000;

    /// Delay before advancing to the next file: [min, max)
    pub const ADVANCE_DELAY_MIN: u64 = 300;
    pub const ADVANCE_DELAY_MAX: u64 = 600;

    /// Pause after the completion event before the run resolves
    pub const COMPLETION_DELAY: u64 = 1000;

    /// Milliseconds per time unit
    pub const DEFAULT_TIME_UNIT_MS: u64 = 1;

    /// Event channel capacity
    pub const EVENT_BUFFER: usize = 64;
}

/// Project store constants
pub mod store {
    /// Simulated latency of documentation generation (milliseconds)
    pub const GENERATION_LATENCY_MS: u64 = 1000;

    /// Name of the project seeded into a fresh store
    pub const SAMPLE_PROJECT_NAME: &str = "Sample Project";
}

/// Documentation output constants
pub mod docs {
    /// Content type of downloaded documentation
    pub const CONTENT_TYPE: &str = "text/markdown";

    /// Characters shown in the short documentation preview
    pub const EXCERPT_CHARS: usize = 500;
}

/// Local directory scanning
pub mod scan {
    /// Directories never included in a scanned tree
    pub const SKIP_DIRS: &[&str] = &[
        "node_modules",
        "target",
        ".git",
        "build",
        "dist",
        "__pycache__",
        "vendor",
        ".venv",
    ];

    /// Upper bound on files collected from one directory
    pub const MAX_FILES: usize = 5_000;
}
