use crate::config::ChangelogConfig;
use crate::diff::{self, ChangeSet};
use crate::error::ChangelogError;
use crate::formatter::{MarkdownTableFormatter, SectionFormatter};
use crate::links::{GitHubLinkReconciler, LinkReconciler};
use crate::manifest::ManifestParser;
use crate::parser::SnapshotParser;
use crate::position::insert_section;
use crate::types::{Dependency, Result, Snapshot};
use crate::utils::RELEASE_LABEL_PATTERN;
use chrono::Local;

/// Result of reconciling a manifest against a changelog
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    /// The document must be rewritten with `content`
    Updated {
        content: String,
        section: String,
        changes: ChangeSet,
    },
    /// The latest section already carries the requested label
    AlreadyCurrent { version: String },
    /// The manifest matches the latest snapshot
    NoChanges,
}

/// Parsed inputs and their diff, before anything is rendered
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub dependencies: Vec<Dependency>,
    pub snapshot: Snapshot,
    pub changes: ChangeSet,
}

/// Today's release label, `YYYY.MM.DD`
#[must_use]
pub fn today_release_label() -> String {
    Local::now().format("%Y.%m.%d").to_string()
}

/// # Errors
/// Returns `InvalidVersion` unless the label has the form `YYYY.MM.DD`
pub fn validate_release_label(label: &str) -> Result<()> {
    if RELEASE_LABEL_PATTERN.is_match(label) {
        Ok(())
    } else {
        Err(ChangelogError::InvalidVersion(label.to_string()))
    }
}

/// Runs the reconciliation pipeline over in-memory documents
pub struct ChangelogUpdater<'a> {
    config: &'a ChangelogConfig,
    formatter: Box<dyn SectionFormatter>,
}

impl<'a> ChangelogUpdater<'a> {
    #[must_use]
    pub fn new(config: &'a ChangelogConfig) -> Self {
        Self {
            config,
            formatter: Box::new(MarkdownTableFormatter),
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Box<dyn SectionFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Parses both documents and computes their diff
    #[must_use]
    pub fn reconcile(&self, manifest: &str, changelog: &str) -> Reconciliation {
        let dependencies = ManifestParser::new(self.config).parse(manifest);
        let snapshot = SnapshotParser::new().parse(changelog);
        let changes = diff::compute(&dependencies, &snapshot);

        Reconciliation {
            dependencies,
            snapshot,
            changes,
        }
    }

    /// Produces the updated changelog for release `version`.
    ///
    /// # Errors
    /// Returns `InvalidVersion` for a malformed label and
    /// `MissingUnreleasedSection` when changes exist but the document has no
    /// `## [Unreleased]` header to insert them under.
    pub fn update(&self, manifest: &str, changelog: &str, version: &str) -> Result<UpdateOutcome> {
        validate_release_label(version)?;

        let Reconciliation {
            dependencies,
            snapshot,
            changes,
        } = self.reconcile(manifest, changelog);

        if self.config.verbose {
            println!("Found {} dependencies in manifest", dependencies.len());
            match snapshot.version() {
                Some(latest) => println!("Latest changelog version: {latest}"),
                None => println!("No previous version found in changelog"),
            }
        }

        if snapshot.version() == Some(version) {
            return Ok(UpdateOutcome::AlreadyCurrent {
                version: version.to_string(),
            });
        }

        if !changes.has_changes() {
            return Ok(UpdateOutcome::NoChanges);
        }

        let section = self.formatter.format(version, &changes);
        let content = insert_section(changelog, &section)
            .ok_or(ChangelogError::MissingUnreleasedSection)?;
        let content = GitHubLinkReconciler::new(self.config).reconcile(&content, version, &changes);

        if self.config.verbose {
            println!(
                "Rendered {} rows, {} removed",
                changes.changes.len(),
                changes.removed.len()
            );
        }

        Ok(UpdateOutcome::Updated {
            content,
            section,
            changes,
        })
    }
}
