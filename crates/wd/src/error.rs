//! CLI error types.

use wd_config::ConfigError;
use wd_meta::MetaError;
use wd_openapi::MergeError;
use wd_sidebar::SyncError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Sync(#[from] SyncError),

    #[error("{0}")]
    Merge(#[from] MergeError),

    #[error("{0}")]
    Meta(#[from] MetaError),
}
