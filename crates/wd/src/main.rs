//! wd CLI - documentation site maintenance.
//!
//! Provides commands for:
//! - `sync`: Rebuild `config.json` sidebars from the content directories
//! - `api merge`: Splice endpoint fragments into generated API pages
//! - `api reset`: Delete generated API pages
//! - `slugs`: Write path-derived slugs into page front matter

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ApiCommand, SlugsArgs, SyncArgs};
use output::Output;

/// wd - documentation site maintenance.
#[derive(Parser)]
#[command(name = "wd", version, about)]
struct Cli {
    /// Path to settings file (default: auto-discover wd.toml).
    #[arg(short = 'c', long, global = true)]
    settings: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synchronize sidebars with the content directories.
    Sync(SyncArgs),
    /// API page commands.
    #[command(subcommand)]
    Api(ApiCommand),
    /// Update slug front matter of every page.
    Slugs(SlugsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = cli.settings.as_deref();
    let result = match cli.command {
        Commands::Sync(args) => args.execute(settings),
        Commands::Api(cmd) => cmd.execute(settings),
        Commands::Slugs(args) => args.execute(settings),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
