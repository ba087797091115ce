//! CLI command implementations.

pub(crate) mod api;
pub(crate) mod slugs;
pub(crate) mod sync;

pub(crate) use api::ApiCommand;
pub(crate) use slugs::SlugsArgs;
pub(crate) use sync::SyncArgs;

use wd_meta::Diagnostics;

use crate::output::Output;

/// Print the warning count of a finished stage.
///
/// The warnings themselves were already logged by the stage.
pub(crate) fn print_warning_count(output: &Output, diagnostics: &Diagnostics) {
    let count = diagnostics.warning_count();
    if count == 0 {
        return;
    }
    let noun = if count == 1 { "warning" } else { "warnings" };
    output.warning(&format!("{count} {noun}"));
}
