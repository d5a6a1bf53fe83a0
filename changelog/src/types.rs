use crate::error::ChangelogError;
use std::collections::HashMap;

/// Type alias for Result with `ChangelogError`
pub type Result<T> = std::result::Result<T, ChangelogError>;

/// A dependency declared in the manifest constraints block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub category: String,
}

/// A data row of the most recent changelog table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangelogEntry {
    pub name: String,
    pub version: String,
    pub status: String,
    pub prev_version: String,
    pub category: String,
}

/// Dependency state recorded in the latest released section of the changelog.
///
/// Entries are keyed by name but keep the order they appear in the table, so
/// that removed entries render in the same order they were recorded.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    version: Option<String>,
    entries: Vec<ChangelogEntry>,
    index: HashMap<String, usize>,
}

impl Snapshot {
    /// A snapshot with no prior state
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..Self::default()
        }
    }

    /// Inserts an entry; a later row with the same name replaces the earlier
    /// one in place.
    pub fn insert(&mut self, entry: ChangelogEntry) {
        match self.index.get(&entry.name) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.index.insert(entry.name.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ChangelogEntry> {
        self.index.get(name).map(|&pos| &self.entries[pos])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangelogEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
