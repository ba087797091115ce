//! Colored terminal output for command summaries.
//!
//! Diagnostics go through `tracing`; this is only the human-facing summary.

use std::path::Path;

use console::{Style, Term};

/// Stderr summary printer.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print `label: path` with the path dimmed.
    pub(crate) fn path(&self, label: &str, path: &Path) {
        let line = format!("{label}: {}", self.dim.apply_to(path.display()));
        let _ = self.term.write_line(&line);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.green, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&self.yellow, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.red, msg);
    }

    /// Dry-run notices and other "nothing happened but it would have" lines.
    pub(crate) fn highlight(&self, msg: &str) {
        self.styled(&self.cyan_bold, msg);
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
