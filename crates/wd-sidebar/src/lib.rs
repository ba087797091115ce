//! Sidebar synchronization for wd documentation sites.
//!
//! Rebuilds the `sidebars` key of `config.json` from the pages under `docs/`
//! and `apiPages/`, keeping the order and casing recorded in the previous
//! sidebars:
//!
//! 1. [`Scanner`] walks the content roots
//! 2. [`ContentTree::build`] folds page paths into sections, categories and groups
//! 3. [`OrderMap::from_sidebars`] extracts the recorded order
//! 4. [`navbar::bind`] maps navbar entries to sections
//! 5. [`synchronize`] merges everything into new sidebars
//!
//! [`run_sync`] runs the whole pipeline against the filesystem and only
//! rewrites `config.json` when its canonical serialization changes.
//!
//! # Example
//!
//! ```ignore
//! use wd_config::Settings;
//! use wd_sidebar::run_sync;
//!
//! let settings = Settings::load(None, None)?;
//! let report = run_sync(&settings.paths_resolved, false)?;
//! println!("{} sidebars, written: {}", report.sidebars.len(), report.written);
//! ```

mod merge;
pub mod names;
pub mod navbar;
mod order;
mod scanner;
mod structure;
mod sync;

pub use order::OrderMap;
pub use scanner::{ScanResult, Scanner};
pub use structure::{ContentNode, ContentSection, ContentTree};
pub use sync::{SyncError, SyncOutcome, SyncReport, run_sync, synchronize};
