//! `wd slugs` command implementation.

use std::path::Path;

use clap::Args;
use wd_config::{CliSettings, Settings};
use wd_meta::slug::update_slugs;

use super::print_warning_count;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the slugs command.
#[derive(Args)]
pub(crate) struct SlugsArgs {
    /// Path segment removed from every slug (overrides settings).
    #[arg(long)]
    remove_segment: Option<String>,
}

impl SlugsArgs {
    /// Execute the slugs command.
    ///
    /// # Errors
    ///
    /// Returns an error if settings cannot be loaded or a content directory
    /// cannot form a file pattern.
    pub(crate) fn execute(self, settings_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            remove_segment: self.remove_segment,
            ..Default::default()
        };
        let settings = Settings::load(settings_path, Some(&cli_settings))?;
        tracing::debug!(
            remove_segment = %settings.slugs.remove_segment,
            "Resolved settings"
        );

        let report = update_slugs(
            &settings.paths_resolved.content_roots(),
            &settings.slugs.remove_segment,
        )?;

        print_warning_count(&output, &report.diagnostics);
        output.success(&format!(
            "Slugs updated: {} changed, {} unchanged",
            report.updated.len(),
            report.unchanged
        ));
        Ok(())
    }
}
