//! OpenAPI page merge for wd documentation sites.
//!
//! The OpenAPI generator writes one `<name>.api.mdx` page per operation into
//! `docs/`. Authors enrich an operation by dropping a
//! `<name>.endpoint.mdx` fragment into `apiPages/`:
//!
//! ```text
//! ---
//! route: POST /items
//! description: Create an item
//! ---
//! Extra prose shown under the endpoint header.
//! ```
//!
//! [`merge_fragments`] splices each fragment body into its generated page
//! right after `</MethodEndpoint>`, copies `description`/`slug` (and `title`
//! in reference mode) into the page's front matter and moves the page next to
//! the fragment's relative location. [`reset_generated_pages`] removes every
//! generated page before a fresh generation.

mod merge;
mod reset;
pub mod route;
pub mod splice;

use std::path::PathBuf;

pub use merge::{MergeReport, MergedPage, merge_fragments};
pub use reset::reset_generated_pages;
pub use route::Route;

/// Fatal merge error.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Invalid glob pattern built from a content directory.
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// Writing or removing a page failed.
    #[error("Failed to update {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
