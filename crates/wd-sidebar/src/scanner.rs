//! Content discovery by filesystem walking.
//!
//! The scanner only finds page files. Folding them into a section tree is the
//! job of [`ContentTree::build`](crate::ContentTree::build).

use std::fs;
use std::path::{Path, PathBuf};

use wd_meta::Diagnostics;

use crate::names::{has_page_extension, is_api_variant};

/// Pages found under the content roots.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Root-relative, forward-slash page paths, in root order then name order.
    pub files: Vec<String>,
    /// Generated `.api` variants that were skipped.
    pub skipped_api_pages: usize,
    /// Unreadable directories.
    pub diagnostics: Diagnostics,
}

impl ScanResult {
    /// Number of pages found.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Walks one or more content roots (`docs/`, `apiPages/`).
pub struct Scanner {
    roots: Vec<PathBuf>,
}

impl Scanner {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Scan every root.
    ///
    /// Roots that don't exist contribute nothing. Paths are relative to their
    /// own root, so `docs/guides/a.mdx` and `apiPages/guides/b.mdx` both land
    /// in the `guides` section.
    pub fn scan(&self) -> ScanResult {
        let mut result = ScanResult::default();
        for root in &self.roots {
            if root.is_dir() {
                scan_directory(root, "", &mut result);
            }
        }
        result
    }
}

fn scan_directory(dir_path: &Path, rel_prefix: &str, result: &mut ScanResult) {
    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            result.diagnostics.warn(format!(
                "Could not read directory {}: {e}",
                dir_path.display()
            ));
            return;
        }
    };

    // Cache file_type and sort by name so output does not depend on the OS
    let mut entries: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|e| {
            let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
            let name = e.file_name().to_string_lossy().into_owned();
            (e.path(), is_dir, name)
        })
        .collect();
    entries.sort_by(|a, b| a.2.cmp(&b.2));

    for (path, is_dir, name) in entries {
        // Skip hidden files/dirs
        if name.starts_with('.') {
            continue;
        }

        let rel_path = if rel_prefix.is_empty() {
            name
        } else {
            format!("{rel_prefix}/{name}")
        };

        if is_dir {
            scan_directory(&path, &rel_path, result);
        } else if has_page_extension(&rel_path) {
            if is_api_variant(&rel_path) {
                result.skipped_api_pages += 1;
            } else {
                result.files.push(rel_path);
            }
        }
    }
}
