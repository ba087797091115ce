//! Side-channel diagnostics.
//!
//! Pipeline stages never log from inside their recursion. They push
//! [`Diagnostic`]s into a [`Diagnostics`] value that travels back with the
//! stage result, and the caller emits the whole batch once.

use std::fmt;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Informational (new item appended, candidate skipped).
    Info,
    /// Recoverable problem; the item was skipped.
    Warning,
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Level::Info => write!(f, "{}", self.message),
            Level::Warning => write!(f, "warning: {}", self.message),
        }
    }
}

/// Ordered collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an informational message.
    pub fn info(&mut self, message: impl Into<String>) {
        self.items.push(Diagnostic {
            level: Level::Info,
            message: message.into(),
        });
    }

    /// Record a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.items.push(Diagnostic {
            level: Level::Warning,
            message: message.into(),
        });
    }

    /// Append all diagnostics from another collection.
    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Warnings only.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.level == Level::Warning)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether any warning message contains `needle`.
    #[must_use]
    pub fn has_warning_containing(&self, needle: &str) -> bool {
        self.warnings().any(|d| d.message.contains(needle))
    }

    /// Forward every diagnostic to `tracing`, tagged with the stage name.
    pub fn emit(&self, stage: &str) {
        for diagnostic in &self.items {
            match diagnostic.level {
                Level::Info => tracing::info!(stage, "{}", diagnostic.message),
                Level::Warning => tracing::warn!(stage, "{}", diagnostic.message),
            }
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
