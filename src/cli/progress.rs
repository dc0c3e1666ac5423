//! Console Progress
//!
//! Renders pipeline events as a single self-overwriting status line on
//! stderr, so stdout stays free for the documentation itself.

use std::io::Write;
use std::time::Instant;

use crate::pipeline::PipelineEvent;

/// Progress of the run being displayed
#[derive(Debug, Clone)]
pub struct ProgressState {
    /// Overall progress (0-100)
    pub progress: f64,
    /// Latest status message
    pub message: String,
    /// File currently being processed
    pub current_file: Option<String>,
    /// Files finished so far
    pub processed: usize,
    /// Files in the run
    pub total: usize,
    /// Events seen
    pub events: usize,
    pub is_running: bool,
    started: Instant,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            progress: 0.0,
            message: String::new(),
            current_file: None,
            processed: 0,
            total: 0,
            events: 0,
            is_running: true,
            started: Instant::now(),
        }
    }
}

impl ProgressState {
    pub fn apply(&mut self, event: &PipelineEvent) {
        self.events += 1;
        self.progress = event.progress();
        if let Some(message) = event.message() {
            self.message = message.to_string();
        }

        match event {
            PipelineEvent::Started { total, .. } => self.total = *total,
            PipelineEvent::FileStarted { file, total, .. } => {
                self.total = *total;
                self.current_file = Some(file.clone());
            }
            PipelineEvent::FileProcessed { index, .. } => self.processed = index + 1,
            PipelineEvent::Completed { .. } => {
                self.processed = self.total;
                self.current_file = None;
                self.is_running = false;
            }
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

/// Console progress renderer
pub struct ConsoleRenderer {
    state: ProgressState,
    show_spinner: bool,
    width: usize,
    enabled: bool,
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self {
            state: ProgressState::default(),
            show_spinner: true,
            width: 30,
            enabled: true,
        }
    }

    pub fn with_spinner(mut self, show: bool) -> Self {
        self.show_spinner = show;
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// A disabled renderer tracks state but prints nothing
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Render current state as one line
    pub fn render(&self) -> String {
        let state = &self.state;

        let spinner = if self.show_spinner && state.is_running {
            let chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            format!("{} ", chars[state.events % chars.len()])
        } else {
            String::new()
        };

        let file = state
            .current_file
            .as_deref()
            .map(|f| format!(" {}", f))
            .unwrap_or_default();

        format!(
            "{}{} {:>3.0}% ({}/{}) {}{}",
            spinner,
            render_progress_bar(state.progress, self.width),
            state.progress,
            state.processed,
            state.total,
            state.message,
            file
        )
    }

    /// Apply an event and redraw the status line
    pub fn on_event(&mut self, event: &PipelineEvent) {
        self.state.apply(event);
        if self.enabled {
            eprint!("\r\x1B[K{}", self.render());
            let _ = std::io::stderr().flush();
        }
    }

    /// End the status line
    pub fn finish(&self) {
        if self.enabled {
            eprintln!();
        }
    }
}

/// Render a progress bar for a percentage
pub fn render_progress_bar(percent: f64, width: usize) -> String {
    let fraction = (percent / 100.0).clamp(0.0, 1.0);
    let filled = (fraction * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Format duration as human-readable string
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
