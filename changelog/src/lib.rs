//! Keeps a BOM changelog in sync with its dependency manifest.
//!
//! The manifest's `constraints` block is parsed into an ordered dependency
//! list, the latest dated section of the changelog is parsed back into a
//! snapshot, and the diff between the two is rendered as a new section plus
//! an updated reference links block.

pub mod config;
pub mod diff;
pub mod error;
pub mod formatter;
pub mod links;
pub mod manifest;
pub mod parser;
pub mod position;
pub mod types;
pub mod updater;
pub mod utils;
pub mod version;

pub use crate::config::{ChangelogConfig, Organization};
pub use crate::updater::{
    ChangelogUpdater, Reconciliation, UpdateOutcome, today_release_label, validate_release_label,
};
pub use crate::diff::{ChangeSet, DependencyChange, Status};
pub use crate::error::ChangelogError;
pub use crate::formatter::{MarkdownTableFormatter, SectionFormatter};
pub use crate::links::{GitHubLinkReconciler, LinkEntry, LinkReconciler};
pub use crate::manifest::ManifestParser;
pub use crate::parser::SnapshotParser;
pub use crate::types::{ChangelogEntry, Dependency, Result, Snapshot};
pub use crate::version::ChangeKind;

use std::fs;
use std::io;
use std::path::Path;

/// Reads a text file, treating a missing file as empty
///
/// # Errors
/// Returns error for any I/O failure other than the file not existing
pub fn read_or_empty(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(ChangelogError::ReadError(e)
            .with_context(format!("Failed to read {}", path.display()))),
    }
}

/// Reconciles the manifest against the changelog without writing anything.
///
/// # Errors
/// Returns error if either file exists but cannot be read
pub fn inspect(
    manifest_path: &Path,
    changelog_path: &Path,
    config: &ChangelogConfig,
) -> Result<Reconciliation> {
    let manifest = read_or_empty(manifest_path)?;
    let changelog = read_or_empty(changelog_path)?;
    Ok(ChangelogUpdater::new(config).reconcile(&manifest, &changelog))
}

/// Computes the update for release `version` from the files on disk,
/// without writing anything.
///
/// # Errors
///
/// Returns error if a file cannot be read, the label is malformed, or the
/// changelog has no `## [Unreleased]` header to insert under.
pub fn prepare_update(
    manifest_path: &Path,
    changelog_path: &Path,
    version: &str,
    config: &ChangelogConfig,
) -> Result<UpdateOutcome> {
    let manifest = read_or_empty(manifest_path)?;
    let changelog = read_or_empty(changelog_path)?;
    ChangelogUpdater::new(config).update(&manifest, &changelog, version)
}

/// Writes the changelog for an [`UpdateOutcome::Updated`] outcome. Any other
/// outcome leaves the file alone.
///
/// # Errors
///
/// Returns error if the file cannot be written
pub fn write_update(changelog_path: &Path, outcome: &UpdateOutcome) -> Result<()> {
    if let UpdateOutcome::Updated { content, .. } = outcome {
        fs::write(changelog_path, content).map_err(|e| {
            ChangelogError::ReadError(e)
                .with_context(format!("Failed to write {}", changelog_path.display()))
        })?;
    }
    Ok(())
}

/// Updates the CHANGELOG.md file with a new section for `version`.
///
/// # Arguments
///
/// * `manifest_path` - Path to the build manifest holding the constraints block
/// * `changelog_path` - Path to the CHANGELOG.md file
/// * `version` - Release label of the new section, `YYYY.MM.DD`
/// * `config` - Parsing and rendering configuration
///
/// # Returns
///
/// The outcome of the run. The changelog is written once, and only when the
/// outcome is [`UpdateOutcome::Updated`].
///
/// # Errors
///
/// Returns error if a file cannot be read or written, the label is malformed,
/// or the changelog has no `## [Unreleased]` header to insert under.
pub fn update_changelog(
    manifest_path: &Path,
    changelog_path: &Path,
    version: &str,
    config: &ChangelogConfig,
) -> Result<UpdateOutcome> {
    let outcome = prepare_update(manifest_path, changelog_path, version, config)?;
    write_update(changelog_path, &outcome)?;
    Ok(outcome)
}
