//! Page metadata conventions shared across wd crates.
//!
//! - [`FrontMatter`]: YAML front matter split, lookup and line-preserving
//!   updates for Markdown/MDX pages
//! - [`slug`]: slug derivation from page paths and bulk slug updates
//! - [`Diagnostics`]: per-item warnings collected by a pipeline stage and
//!   emitted once the stage finishes

mod diagnostics;
mod front_matter;
pub mod slug;

pub use diagnostics::{Diagnostic, Diagnostics, Level};
pub use front_matter::{FrontMatter, body};

/// Metadata error.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// Invalid glob pattern built from a content root.
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}
