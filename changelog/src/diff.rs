use crate::types::{ChangelogEntry, Dependency, Snapshot};
use crate::version::{self, ChangeKind};
use std::collections::HashSet;

/// Classification of one artifact between the snapshot and the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Unchanged,
    Changed(ChangeKind),
    /// Version text differs but compares equal, e.g. `1.2` -> `1.2.0`
    Relabeled,
    New,
    Removed,
}

impl Status {
    /// Marker written in the status column
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Unchanged | Self::Relabeled => "",
            Self::Changed(kind) => kind.marker(),
            Self::New => "🆕",
            Self::Removed => "❌",
        }
    }
}

/// A manifest dependency with its classification against the snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyChange {
    pub dependency: Dependency,
    pub status: Status,
    pub previous_version: Option<String>,
}

/// Result of comparing the manifest against the latest snapshot
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub changes: Vec<DependencyChange>,
    /// Snapshot entries absent from the manifest, in snapshot order
    pub removed: Vec<ChangelogEntry>,
}

impl ChangeSet {
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.removed.is_empty()
            || self
                .changes
                .iter()
                .any(|change| change.status != Status::Unchanged)
    }

    pub fn added(&self) -> impl Iterator<Item = &Dependency> {
        self.changes
            .iter()
            .filter(|change| change.status == Status::New)
            .map(|change| &change.dependency)
    }

    #[must_use]
    pub fn removed_names(&self) -> HashSet<&str> {
        self.removed.iter().map(|entry| entry.name.as_str()).collect()
    }

    pub fn dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.changes.iter().map(|change| &change.dependency)
    }
}

/// Compares manifest dependencies against a snapshot.
///
/// Dependencies keep manifest order. Removed entries keep snapshot order and
/// their recorded category.
#[must_use]
pub fn compute(dependencies: &[Dependency], snapshot: &Snapshot) -> ChangeSet {
    let changes = dependencies
        .iter()
        .map(|dependency| {
            let (status, previous_version) = match snapshot.get(&dependency.artifact_id) {
                Some(old) if old.version == dependency.version => (Status::Unchanged, None),
                Some(old) => {
                    let status = version::compare(&old.version, &dependency.version)
                        .map_or(Status::Relabeled, Status::Changed);
                    (status, Some(old.version.clone()))
                }
                None => (Status::New, None),
            };
            DependencyChange {
                dependency: dependency.clone(),
                status,
                previous_version,
            }
        })
        .collect();

    let current: HashSet<&str> = dependencies
        .iter()
        .map(|dependency| dependency.artifact_id.as_str())
        .collect();

    let removed = snapshot
        .iter()
        .filter(|entry| !current.contains(entry.name.as_str()))
        .cloned()
        .collect();

    ChangeSet { changes, removed }
}
