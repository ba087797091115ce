//! Fragment-to-page merge in both merge modes.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use wd_config::MergeMode;
use wd_meta::{Diagnostics, FrontMatter};

use crate::MergeError;
use crate::route::Route;
use crate::splice::{ANCHOR, copy_front_matter, fragment_body, splice};

const FRAGMENT_SUFFIX: &str = ".endpoint.mdx";
const GENERATED_SUFFIX: &str = ".api.mdx";

/// Front matter keys copied in dashboard mode.
const DASHBOARD_KEYS: &[&str] = &["description", "slug"];
/// Front matter keys copied in reference mode when the page already has a block.
const REFERENCE_KEYS: &[&str] = &["description", "slug", "title"];

/// One fragment merged into a generated page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedPage {
    /// The `.endpoint.mdx` fragment.
    pub fragment: PathBuf,
    /// Page written.
    pub target: PathBuf,
    /// Matched page removed because it lived elsewhere.
    pub replaced: Option<PathBuf>,
    /// Whether the target's content changed.
    pub changed: bool,
}

/// Summary of a [`merge_fragments`] call.
#[derive(Debug, Default)]
pub struct MergeReport {
    pub merged: Vec<MergedPage>,
    /// Fragments left unmerged (see diagnostics for the reason).
    pub skipped: usize,
    pub diagnostics: Diagnostics,
}

/// Merge every `*.endpoint.mdx` fragment under `api_pages_dir` into the
/// generated pages under `docs_dir`.
///
/// - [`MergeMode::Dashboard`]: the target is found anywhere under `docs_dir`
///   by base name and route, then written to the fragment's relative location.
/// - [`MergeMode::Reference`]: the target is
///   `docs_dir/reference/<relative dir>/<name>.api.mdx`, merged in place.
///
/// Per-fragment problems are diagnostics; only filesystem write failures
/// abort the run.
pub fn merge_fragments(
    api_pages_dir: &Path,
    docs_dir: &Path,
    mode: MergeMode,
) -> Result<MergeReport, MergeError> {
    let mut report = MergeReport::default();
    if !api_pages_dir.is_dir() {
        tracing::info!(path = %api_pages_dir.display(), "No fragment directory, nothing to merge");
        return Ok(report);
    }

    let mut index = match mode {
        MergeMode::Dashboard => CandidateIndex::scan(docs_dir)?,
        MergeMode::Reference => CandidateIndex::default(),
    };

    for path in find_files(api_pages_dir, FRAGMENT_SUFFIX)? {
        let Some(fragment) = Fragment::load(&path, api_pages_dir, &mut report.diagnostics) else {
            report.skipped += 1;
            continue;
        };
        let merged = match mode {
            MergeMode::Dashboard => {
                merge_dashboard(&fragment, docs_dir, &mut index, &mut report.diagnostics)?
            }
            MergeMode::Reference => merge_reference(&fragment, docs_dir, &mut report.diagnostics)?,
        };
        match merged {
            Some(page) => report.merged.push(page),
            None => report.skipped += 1,
        }
    }

    report.diagnostics.emit("api-merge");
    Ok(report)
}

/// Endpoint fragment ready to merge.
struct Fragment {
    path: PathBuf,
    /// Directory relative to the fragment root.
    rel_dir: PathBuf,
    base_name: String,
    front_matter: FrontMatter,
    body: String,
}

impl Fragment {
    fn load(path: &Path, root: &Path, diagnostics: &mut Diagnostics) -> Option<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                diagnostics.warn(format!("Could not read {}: {e}", path.display()));
                return None;
            }
        };
        let file_name = path.file_name()?.to_string_lossy();
        let base_name = file_name.strip_suffix(FRAGMENT_SUFFIX)?.to_owned();
        let rel_dir = path
            .parent()
            .and_then(|parent| parent.strip_prefix(root).ok())
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Some(Self {
            path: path.to_path_buf(),
            rel_dir,
            base_name,
            front_matter: FrontMatter::parse(&content).unwrap_or_default(),
            body: fragment_body(&content),
        })
    }

    fn file_name(&self) -> String {
        format!("{}{FRAGMENT_SUFFIX}", self.base_name)
    }

    fn generated_name(&self) -> String {
        format!("{}{GENERATED_SUFFIX}", self.base_name)
    }
}

fn merge_dashboard(
    fragment: &Fragment,
    docs_dir: &Path,
    index: &mut CandidateIndex,
    diagnostics: &mut Diagnostics,
) -> Result<Option<MergedPage>, MergeError> {
    let Some(route) = fragment
        .front_matter
        .get("route")
        .and_then(|route| Route::parse(&route))
    else {
        diagnostics.warn(format!("No route metadata found in {}", fragment.file_name()));
        return Ok(None);
    };

    let mut matches = Vec::new();
    for candidate in index.get(&fragment.base_name) {
        let content = match fs::read_to_string(candidate) {
            Ok(content) => content,
            Err(e) => {
                diagnostics.warn(format!("Could not read {}: {e}", candidate.display()));
                continue;
            }
        };
        match Route::from_method_endpoint(&content) {
            Some(found) if found == route => matches.push((candidate.clone(), content)),
            Some(found) => diagnostics.info(format!(
                "Candidate {} metadata mismatch: expected {route}, got {found}",
                candidate.display()
            )),
            None => diagnostics.info(format!(
                "Candidate {} missing <MethodEndpoint> tag.",
                candidate.display()
            )),
        }
    }

    if matches.len() > 1 {
        diagnostics.warn(format!(
            "{} pages match {} ({route}); using {}",
            matches.len(),
            fragment.file_name(),
            matches[0].0.display()
        ));
    }
    let Some((matched, page)) = matches.into_iter().next() else {
        diagnostics.warn(format!(
            "No matching API file found for {} (expected route: {route})",
            fragment.file_name()
        ));
        return Ok(None);
    };

    let Some(spliced) = splice(&page, &fragment.body) else {
        diagnostics.warn(format!("No {ANCHOR} tag found in {}", matched.display()));
        return Ok(None);
    };
    let merged = copy_front_matter(&spliced, &fragment.front_matter, DASHBOARD_KEYS);

    let destination = docs_dir.join(&fragment.rel_dir).join(fragment.generated_name());
    let moved = matched != destination;
    let changed = moved || merged != page;
    if changed {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|source| MergeError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        write_page(&destination, &merged)?;
    }

    let replaced = if moved {
        fs::remove_file(&matched).map_err(|source| MergeError::Io {
            path: matched.clone(),
            source,
        })?;
        index.relocate(&fragment.base_name, &matched, &destination);
        Some(matched)
    } else {
        None
    };

    tracing::info!(
        fragment = %fragment.path.display(),
        target = %destination.display(),
        "Merged endpoint fragment"
    );
    Ok(Some(MergedPage {
        fragment: fragment.path.clone(),
        target: destination,
        replaced,
        changed,
    }))
}

fn merge_reference(
    fragment: &Fragment,
    docs_dir: &Path,
    diagnostics: &mut Diagnostics,
) -> Result<Option<MergedPage>, MergeError> {
    let target = docs_dir
        .join("reference")
        .join(&fragment.rel_dir)
        .join(fragment.generated_name());
    if !target.is_file() {
        diagnostics.info(format!(
            "No generated page {} for {}. Skipping.",
            target.display(),
            fragment.file_name()
        ));
        return Ok(None);
    }

    let page = match fs::read_to_string(&target) {
        Ok(page) => page,
        Err(e) => {
            diagnostics.warn(format!("Could not read {}: {e}", target.display()));
            return Ok(None);
        }
    };
    let Some(spliced) = splice(&page, &fragment.body) else {
        diagnostics.warn(format!("No {ANCHOR} tag found in {}", fragment.generated_name()));
        return Ok(None);
    };
    // A block created from scratch never carries a title.
    let keys = if FrontMatter::parse(&spliced).is_some() {
        REFERENCE_KEYS
    } else {
        DASHBOARD_KEYS
    };
    let merged = copy_front_matter(&spliced, &fragment.front_matter, keys);

    let changed = merged != page;
    if changed {
        write_page(&target, &merged)?;
    }
    tracing::info!(
        fragment = %fragment.path.display(),
        target = %target.display(),
        "Merged endpoint fragment"
    );
    Ok(Some(MergedPage {
        fragment: fragment.path.clone(),
        target,
        replaced: None,
        changed,
    }))
}

fn write_page(path: &Path, content: &str) -> Result<(), MergeError> {
    fs::write(path, content).map_err(|source| MergeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Files under `dir` whose name ends with `suffix`, in path order.
fn find_files(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, MergeError> {
    let pattern = format!("{}/**/*{suffix}", glob::Pattern::escape(&dir.to_string_lossy()));
    let mut files: Vec<PathBuf> = glob::glob(&pattern)?
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Generated pages by base name (`create-item` for `create-item.api.mdx`).
#[derive(Debug, Default)]
struct CandidateIndex {
    pages: HashMap<String, Vec<PathBuf>>,
}

impl CandidateIndex {
    fn scan(docs_dir: &Path) -> Result<Self, MergeError> {
        let mut index = Self::default();
        if !docs_dir.is_dir() {
            return Ok(index);
        }
        for path in find_files(docs_dir, GENERATED_SUFFIX)? {
            if let Some(base) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_suffix(GENERATED_SUFFIX))
            {
                index.pages.entry(base.to_owned()).or_default().push(path);
            }
        }
        Ok(index)
    }

    fn get(&self, base_name: &str) -> &[PathBuf] {
        self.pages.get(base_name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Record that the page at `from` now lives at `to`.
    fn relocate(&mut self, base_name: &str, from: &Path, to: &Path) {
        let paths = self.pages.entry(base_name.to_owned()).or_default();
        paths.retain(|path| path != from);
        if !paths.iter().any(|path| path == to) {
            paths.push(to.to_path_buf());
            paths.sort();
        }
    }
}
