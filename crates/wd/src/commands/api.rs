//! `wd api` command implementations.

use std::path::Path;

use clap::{Args, Subcommand};
use wd_config::{CliSettings, MergeMode, Settings};
use wd_openapi::{merge_fragments, reset_generated_pages};

use super::print_warning_count;
use crate::error::CliError;
use crate::output::Output;

/// API page commands.
#[derive(Subcommand)]
pub(crate) enum ApiCommand {
    /// Merge endpoint fragments into generated API pages.
    Merge(MergeArgs),
    /// Delete every generated `*.api.mdx` page.
    Reset,
}

/// Arguments for the api merge command.
#[derive(Args)]
pub(crate) struct MergeArgs {
    /// Merge mode: dashboard or reference (overrides settings).
    #[arg(long)]
    mode: Option<MergeMode>,
}

impl ApiCommand {
    /// Execute the api subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if settings cannot be loaded or a page cannot be
    /// written or removed.
    pub(crate) fn execute(self, settings_path: Option<&Path>) -> Result<(), CliError> {
        match self {
            Self::Merge(args) => args.execute(settings_path),
            Self::Reset => reset(settings_path),
        }
    }
}

impl MergeArgs {
    fn execute(self, settings_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            merge_mode: self.mode,
            ..Default::default()
        };
        let settings = Settings::load(settings_path, Some(&cli_settings))?;
        let paths = &settings.paths_resolved;
        let mode = settings.api.merge_mode;
        tracing::debug!(?mode, docs_dir = %paths.docs_dir.display(), "Resolved settings");

        let mode_name = match mode {
            MergeMode::Dashboard => "dashboard",
            MergeMode::Reference => "reference",
        };
        output.path(&format!("Fragments ({mode_name} mode)"), &paths.api_pages_dir);
        let report = merge_fragments(&paths.api_pages_dir, &paths.docs_dir, mode)?;

        for page in report.merged.iter().filter(|page| page.changed) {
            output.info(&format!("  {}", page.target.display()));
        }
        print_warning_count(&output, &report.diagnostics);
        output.success(&format!(
            "API documentation merge completed: {} merged, {} skipped",
            report.merged.len(),
            report.skipped
        ));
        Ok(())
    }
}

fn reset(settings_path: Option<&Path>) -> Result<(), CliError> {
    let output = Output::new();
    let settings = Settings::load(settings_path, None)?;

    let deleted = reset_generated_pages(&settings.paths_resolved.docs_dir)?;
    for path in &deleted {
        tracing::debug!(path = %path.display(), "Deleted generated page");
    }

    output.success(&format!("Deleted {} generated API pages", deleted.len()));
    Ok(())
}
