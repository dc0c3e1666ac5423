use console::style;

use crate::types::{DocError, ErrorCategory};

/// Notification-style console output. Everything goes to stderr; stdout is
/// left to command results.
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// Quiet output keeps errors and warnings only
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("✓").green(), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("ℹ").blue(), message);
        }
    }

    pub fn header(&self, message: &str) {
        if !self.quiet {
            eprintln!("\n{}", style(message).bold().underlined());
        }
    }

    pub fn section(&self, message: &str) {
        if !self.quiet {
            eprintln!("\n{}", style(message).bold());
            eprintln!("{}", "─".repeat(40));
        }
    }

    /// Report a failed operation the way its category is surfaced to users
    pub fn notify(&self, err: &DocError) {
        let message = err.to_string();
        match err.category() {
            ErrorCategory::Cancelled => self.info(&message),
            category if category.is_user_error() => self.warning(&message),
            _ => self.error(&message),
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
