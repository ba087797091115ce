//! Slug derivation from page paths.
//!
//! Every `.mdx` page gets a `slug` front matter key derived from its path:
//!
//! - `docs/guides/Getting Started/intro.mdx` -> `/guides/getting-started/intro`
//! - `docs/guides/basics/index.mdx` -> `/guides/basics`
//! - `apiPages/reference/create-item.endpoint.mdx` -> `/reference/create-item`
//!
//! A configurable segment (default `documentation`) is removed wherever it
//! appears, so a `documentation/` wrapper directory does not leak into URLs.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::{Diagnostics, FrontMatter, MetaError};

/// Content root directory names dropped from the front of a path.
const CONTENT_ROOTS: &[&str] = &["docs", "apiPages"];

static ENDPOINT_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.endpoint").expect("invalid endpoint marker regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

/// Generate the slug for a project-relative page path.
///
/// A leading `docs` or `apiPages` segment is dropped before the rules in
/// [`slug_for_root_relative`] apply.
#[must_use]
pub fn generate_slug(file_path: &str, remove_segment: &str) -> String {
    let mut segments: Vec<&str> = file_path.split(['/', '\\']).collect();
    if segments.first().is_some_and(|first| CONTENT_ROOTS.contains(first)) {
        segments.remove(0);
    }
    slug_from_segments(segments, remove_segment)
}

/// Generate the slug for a path relative to a content root.
///
/// - The file extension and any `.endpoint` marker are stripped
/// - A final `index` segment is dropped
/// - Segments equal to `remove_segment` (case-insensitive) are dropped
/// - Segments are lowercased, whitespace runs become `-`
#[must_use]
pub fn slug_for_root_relative(rel_path: &str, remove_segment: &str) -> String {
    slug_from_segments(rel_path.split(['/', '\\']).collect(), remove_segment)
}

fn slug_from_segments(segments: Vec<&str>, remove_segment: &str) -> String {
    let mut file_name = None;
    if let Some(last) = segments.last() {
        let path = Path::new(last);
        if path.extension().is_some() {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            file_name = Some(ENDPOINT_MARKER_RE.replace_all(&stem, "").into_owned());
        }
    }

    let mut owned: Vec<String> = segments.into_iter().map(str::to_owned).collect();
    if let Some(name) = file_name {
        if name.eq_ignore_ascii_case("index") {
            owned.pop();
        } else if let Some(last) = owned.last_mut() {
            *last = name;
        }
    }

    let slug = owned
        .iter()
        .filter(|segment| {
            remove_segment.is_empty() || segment.to_lowercase() != remove_segment.to_lowercase()
        })
        .map(|segment| WHITESPACE_RE.replace_all(&segment.to_lowercase(), "-").into_owned())
        .collect::<Vec<_>>()
        .join("/");

    format!("/{slug}")
}

/// Outcome of a bulk slug update.
#[derive(Debug, Default)]
pub struct SlugReport {
    /// Files whose front matter changed.
    pub updated: Vec<PathBuf>,
    /// Files that already carried the right slug.
    pub unchanged: usize,
    /// Per-file read/write failures.
    pub diagnostics: Diagnostics,
}

/// Set the `slug` key of every `.mdx` page under the given content roots.
///
/// Slugs are computed from the path relative to its root. Files that already
/// carry the expected slug are not rewritten. Missing roots are skipped.
/// Diagnostics are emitted through `tracing` before returning.
///
/// # Errors
///
/// Returns `MetaError::Pattern` if a root path cannot form a glob pattern.
pub fn update_slugs(roots: &[PathBuf], remove_segment: &str) -> Result<SlugReport, MetaError> {
    let mut report = SlugReport::default();

    for root in roots {
        if !root.is_dir() {
            continue;
        }
        let pattern = format!(
            "{}/**/*.mdx",
            glob::Pattern::escape(&root.to_string_lossy())
        );
        for entry in glob::glob(&pattern)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    report
                        .diagnostics
                        .warn(format!("Could not read {}: {e}", e.path().display()));
                    continue;
                }
            };
            let Ok(rel) = path.strip_prefix(root) else {
                continue;
            };
            let rel = rel.to_string_lossy().replace('\\', "/");
            let slug = slug_for_root_relative(&rel, remove_segment);
            update_file_slug(&path, &slug, &mut report);
        }
    }

    report.diagnostics.emit("slugs");
    Ok(report)
}

fn update_file_slug(path: &Path, slug: &str, report: &mut SlugReport) {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            report
                .diagnostics
                .warn(format!("Error reading file {}: {e}", path.display()));
            return;
        }
    };

    let mut front_matter = FrontMatter::parse(&content).unwrap_or_default();
    if front_matter.get("slug").as_deref() == Some(slug) {
        report.unchanged += 1;
        return;
    }
    front_matter.set("slug", slug);
    let updated = front_matter.replace_in(&content);

    match std::fs::write(path, updated) {
        Ok(()) => {
            report
                .diagnostics
                .info(format!("Updated slug in file: {} -> {slug}", path.display()));
            report.updated.push(path.to_path_buf());
        }
        Err(e) => report
            .diagnostics
            .warn(format!("Error writing file {}: {e}", path.display())),
    }
}
