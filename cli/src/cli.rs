use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bom-changelog")]
#[command(
    author,
    version,
    about = "Keeps a BOM changelog in sync with its dependency manifest"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Input files shared by every command
#[derive(Args, Clone, Debug)]
pub struct Sources {
    /// Build manifest holding the constraints block
    #[clap(short, long, default_value = "build.gradle.kts")]
    pub manifest: PathBuf,

    /// Changelog to update
    #[clap(short, long, default_value = "CHANGELOG.md")]
    pub changelog: PathBuf,

    /// Configuration file (defaults to bom-changelog.toml when present)
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output with additional information
    #[clap(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a changelog section for the dependencies changed since the last release
    Update {
        /// Release label in YYYY.MM.DD format (defaults to today)
        version: Option<String>,

        #[command(flatten)]
        sources: Sources,

        /// Print the new section instead of writing the changelog
        #[clap(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Show the pending dependency changes without touching any file
    Status {
        #[command(flatten)]
        sources: Sources,
    },
}
