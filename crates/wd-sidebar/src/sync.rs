//! Sidebar synchronization pipeline.

use std::path::PathBuf;

use wd_config::{ConfigError, NavbarItem, PathsConfig, SidebarSection, SiteConfig};
use wd_meta::Diagnostics;

use crate::merge::{Merger, PathRewrite};
use crate::names::normalize_key;
use crate::navbar::{BoundContent, Binding, bind, bootstrap_navbar, report_orphans};
use crate::order::OrderMap;
use crate::scanner::Scanner;
use crate::structure::{ContentNode, ContentTree};

/// Fatal synchronization error.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// `config.json` missing, unreadable or not a JSON object.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Writing the updated `config.json` failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of merging a content tree into a site configuration.
#[derive(Debug, Default)]
pub struct SyncOutcome {
    /// New `sidebars`, in navbar order.
    pub sidebars: Vec<SidebarSection>,
    /// Navbar synthesized because the configuration had none.
    pub bootstrapped_navbar: Option<Vec<NavbarItem>>,
    pub diagnostics: Diagnostics,
}

/// Compute new sidebars for `config` from `tree`.
///
/// Pure: reads the navbar and previous sidebars from `config`, touches
/// nothing on disk. A navbar is bootstrapped only when `config` has no
/// navbar entries at all; malformed entries are reported, never replaced.
pub fn synchronize(config: &SiteConfig, tree: &ContentTree) -> SyncOutcome {
    let mut outcome = SyncOutcome::default();

    let (mut navbar, navbar_problems) = config.navbar();
    for problem in navbar_problems {
        outcome.diagnostics.warn(problem);
    }
    if !config.has_navbar() && !tree.is_empty() {
        navbar = bootstrap_navbar(tree);
        outcome.diagnostics.info(format!(
            "No navbar items found. Generated {} navbar items from top-level folders.",
            navbar.len()
        ));
        outcome.bootstrapped_navbar = Some(navbar.clone());
    }

    let order = OrderMap::from_sidebars(config.get("sidebars"));
    let (bindings, bind_diagnostics) = bind(&navbar, tree);
    outcome.diagnostics.extend(bind_diagnostics);

    for binding in &bindings {
        let (section, diagnostics) = build_section(binding, &order);
        outcome.diagnostics.extend(diagnostics);
        if !section.categories.is_empty() {
            outcome.sidebars.push(section);
        }
    }

    outcome.diagnostics.extend(report_orphans(&navbar, tree));
    outcome
}

fn build_section(binding: &Binding<'_>, order: &OrderMap) -> (SidebarSection, Diagnostics) {
    let section_key = normalize_key(binding.sidebar_ref);

    let (categories, diagnostics) = match binding.content {
        BoundContent::Section(section) => {
            let nodes: Vec<&ContentNode> = section.categories.iter().collect();
            let mut merger = Merger::new(order, PathRewrite::Keep);
            let categories = merger.merge_categories(&nodes, &section_key);
            (categories, merger.into_diagnostics())
        }
        BoundContent::DropdownChild(child) => {
            // The child's groups act as categories
            let nodes: Vec<&ContentNode> = child.groups.iter().collect();
            let mut merger = Merger::new(order, PathRewrite::DropFirstSegment);
            let categories = merger.merge_categories(&nodes, &section_key);
            let mut diagnostics = merger.into_diagnostics();
            for page in child.pages.iter().chain(&child.special_page) {
                diagnostics.warn(format!(
                    "Page '{page}' lies directly in dropdown directory '{}' for sidebarRef '{}'. Skipping.",
                    child.name, binding.sidebar_ref
                ));
            }
            (categories, diagnostics)
        }
    };

    (
        SidebarSection {
            sidebar_ref: binding.sidebar_ref.to_owned(),
            categories,
        },
        diagnostics,
    )
}

/// Summary of a [`run_sync`] call.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Pages found under the content roots.
    pub file_count: usize,
    /// Generated `.api` pages left out of the sidebars.
    pub skipped_api_pages: usize,
    pub sidebars: Vec<SidebarSection>,
    /// A navbar was generated and persisted.
    pub navbar_bootstrapped: bool,
    /// The canonical serialization differs from the file's previous content.
    pub changed: bool,
    /// `config.json` was rewritten (never in dry-run mode).
    pub written: bool,
    pub diagnostics: Diagnostics,
}

/// Synchronize `config.json` with the content on disk.
///
/// The file is written only when the canonical serialization changes and
/// `dry_run` is off. Diagnostics are emitted through `tracing` once the
/// pipeline finishes and returned in the report.
pub fn run_sync(paths: &PathsConfig, dry_run: bool) -> Result<SyncReport, SyncError> {
    tracing::info!(path = %paths.config_file.display(), "Using config file");
    let mut config = SiteConfig::load(&paths.config_file)?;
    let original_json = config.to_pretty_json()?;

    let scan = Scanner::new(paths.content_roots()).scan();
    tracing::info!(files = scan.file_count(), "Scanned content roots");

    let mut report = SyncReport {
        file_count: scan.file_count(),
        skipped_api_pages: scan.skipped_api_pages,
        ..SyncReport::default()
    };
    report.diagnostics.extend(scan.diagnostics);

    let (tree, structure_diagnostics) = ContentTree::build(&scan.files);
    report.diagnostics.extend(structure_diagnostics);

    let outcome = synchronize(&config, &tree);
    report.diagnostics.extend(outcome.diagnostics);

    if let Some(navbar) = &outcome.bootstrapped_navbar {
        config.set_navbar(navbar)?;
        report.navbar_bootstrapped = true;
    }

    if !paths.docs_dir.exists() && !paths.api_pages_dir.exists() && config.has_sidebars() {
        report.diagnostics.info(
            "Clearing existing documentation sidebars: content directories not found.",
        );
    }
    config.set_sidebars(&outcome.sidebars)?;
    report.sidebars = outcome.sidebars;

    let new_json = config.to_pretty_json()?;
    report.changed = new_json != original_json;

    if report.changed && !dry_run {
        std::fs::write(&paths.config_file, &new_json).map_err(|source| SyncError::Write {
            path: paths.config_file.clone(),
            source,
        })?;
        report.written = true;
        tracing::info!(path = %paths.config_file.display(), "Configuration updated");
    } else if report.changed {
        tracing::info!("Configuration requires update (dry run, not written)");
    } else {
        tracing::info!("Configuration already up-to-date");
    }

    report.diagnostics.emit("sync");
    Ok(report)
}
