//! `wd sync` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use wd_config::{CliSettings, Settings};
use wd_sidebar::{SyncReport, run_sync};

use super::print_warning_count;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sync command.
#[derive(Args)]
pub(crate) struct SyncArgs {
    /// Site configuration file (overrides settings).
    #[arg(long)]
    config_file: Option<PathBuf>,

    /// Documentation directory (overrides settings).
    #[arg(long)]
    docs_dir: Option<PathBuf>,

    /// Endpoint fragment directory (overrides settings).
    #[arg(long)]
    api_pages_dir: Option<PathBuf>,

    /// Compute the new sidebars without writing config.json.
    #[arg(long)]
    dry_run: bool,
}

impl SyncArgs {
    /// Execute the sync command.
    ///
    /// # Errors
    ///
    /// Returns an error if settings or `config.json` cannot be loaded, or the
    /// updated configuration cannot be written.
    pub(crate) fn execute(self, settings_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            config_file: self.config_file,
            docs_dir: self.docs_dir,
            api_pages_dir: self.api_pages_dir,
            ..Default::default()
        };
        let settings = Settings::load(settings_path, Some(&cli_settings))?;
        let paths = &settings.paths_resolved;

        tracing::debug!(docs_dir = %paths.docs_dir.display(), "Resolved settings");

        output.path("Config file", &paths.config_file);
        let report = run_sync(paths, self.dry_run)?;
        print_sync_report(&output, &report, self.dry_run);

        Ok(())
    }
}

fn print_sync_report(output: &Output, report: &SyncReport, dry_run: bool) {
    output.info(&format!(
        "Processed {} pages ({} generated API pages skipped)",
        report.file_count, report.skipped_api_pages
    ));
    if report.navbar_bootstrapped {
        output.info("Generated navbar from top-level content directories");
    }
    for section in &report.sidebars {
        let landing = section.first_page().unwrap_or("-");
        output.info(&format!(
            "  {} ({} categories, first page: {landing})",
            section.sidebar_ref,
            section.categories.len()
        ));
    }
    print_warning_count(output, &report.diagnostics);

    if !report.changed {
        output.success("Configuration already up-to-date");
    } else if dry_run {
        output.highlight("[DRY RUN] Configuration requires update, nothing written");
    } else {
        output.success("Configuration updated");
    }
}
